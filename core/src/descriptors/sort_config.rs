//! Sort configuration: per-type defaults and the permutations a reference
//! point makes available.

use crate::bucket::Bucket;
use crate::sort::SortItem;

/// Default sorts plus what the user could sort on, given the current bucket
/// cardinalities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortConfig {
    pub supported: bool,
    pub default_sorts: Vec<SortItem>,
    /// Attribute local identifiers available for sorting.
    pub available_attribute_sorts: Vec<String>,
    /// Measure local identifiers available for sorting.
    pub available_measure_sorts: Vec<String>,
}

impl SortConfig {
    pub fn unsupported() -> SortConfig {
        SortConfig::default()
    }

    pub fn from_buckets(buckets: &[Bucket], default_sorts: Vec<SortItem>) -> SortConfig {
        SortConfig {
            supported: true,
            default_sorts,
            available_attribute_sorts: buckets
                .iter()
                .flat_map(Bucket::attributes)
                .map(|a| a.local_identifier.clone())
                .collect(),
            available_measure_sorts: buckets
                .iter()
                .flat_map(Bucket::measures)
                .map(|m| m.local_identifier.clone())
                .collect(),
        }
    }
}

/// Keeps only sorts whose referenced identifiers are all present.
pub fn remove_invalid_sorts(sorts: &[SortItem], valid_identifiers: &[&str]) -> Vec<SortItem> {
    sorts
        .iter()
        .filter(|sort| {
            sort.referenced_identifiers()
                .iter()
                .all(|id| valid_identifiers.contains(id))
        })
        .cloned()
        .collect()
}
