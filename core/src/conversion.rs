//! Bucket → AFM conversion.

use rustc_hash::FxHashMap;

use crate::afm::{Afm, AfmAttribute, AfmMeasure, NativeTotal};
use crate::bucket::{Bucket, TotalType};
use crate::filter::Filter;
use crate::visualization::VisualizationObject;

/// Flattens buckets (in bucket order) and filters into the execution AFM.
///
/// Measure aliases fall back to titles so the backend always has a display
/// name to put into result headers. No-op filters are dropped and date
/// filters are merged per data set, last one winning.
pub fn convert_buckets_to_afm(buckets: &[Bucket], filters: &[Filter]) -> Afm {
    let mut afm = Afm::default();

    for bucket in buckets {
        for measure in bucket.measures() {
            afm.measures.push(AfmMeasure {
                local_identifier: measure.local_identifier.clone(),
                definition: measure.definition.clone(),
                alias: measure.effective_title().map(str::to_string),
                format: measure.format.clone(),
            });
        }
        for attribute in bucket.attributes() {
            afm.attributes.push(AfmAttribute {
                local_identifier: attribute.local_identifier.clone(),
                display_form: attribute.display_form.clone(),
                alias: attribute.alias.clone(),
            });
        }
        for total in &bucket.totals {
            if total.total_type == TotalType::Nat {
                afm.native_totals.push(NativeTotal {
                    measure_identifier: total.measure_identifier.clone(),
                    attribute_identifiers: vec![total.attribute_identifier.clone()],
                });
            }
        }
    }

    afm.filters = merge_filters(filters);
    afm
}

/// Converts a whole visualization object, taking its own filters.
pub fn convert_visualization_to_afm(vis: &VisualizationObject) -> Afm {
    convert_buckets_to_afm(&vis.buckets, &vis.filters)
}

fn merge_filters(filters: &[Filter]) -> Vec<Filter> {
    let mut merged: Vec<Filter> = Vec::with_capacity(filters.len());
    // Index of the date filter kept per data set; a later filter on the
    // same data set replaces the earlier one in place.
    let mut date_slots: FxHashMap<String, usize> = FxHashMap::default();

    for filter in filters {
        if filter.is_noop() {
            continue;
        }
        match filter.date_data_set() {
            Some(data_set) => {
                let key = match (data_set.uri(), data_set.identifier()) {
                    (Some(uri), _) => format!("uri:{uri}"),
                    (None, Some(id)) => format!("id:{id}"),
                    (None, None) => continue,
                };
                if let Some(&slot) = date_slots.get(&key) {
                    merged[slot] = filter.clone();
                } else {
                    date_slots.insert(key, merged.len());
                    merged.push(filter.clone());
                }
            }
            None => merged.push(filter.clone()),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{names, BucketItem, Total, VisAttribute};
    use crate::filter::{granularity, NegativeAttributeFilter, RelativeDateFilter};
    use crate::measure::{Measure, MeasureDefinition, SimpleMeasureDefinition};
    use crate::objref::uri_ref;

    fn measure(local_id: &str, title: Option<&str>) -> BucketItem {
        BucketItem::Measure(Measure {
            local_identifier: local_id.to_string(),
            definition: MeasureDefinition::Simple(SimpleMeasureDefinition {
                item: uri_ref("/gdc/md/p/obj/1"),
                aggregation: None,
                filters: Vec::new(),
                compute_ratio: false,
            }),
            title: title.map(str::to_string),
            alias: None,
            format: None,
        })
    }

    fn attribute(local_id: &str) -> BucketItem {
        BucketItem::Attribute(VisAttribute {
            local_identifier: local_id.to_string(),
            display_form: uri_ref("/gdc/md/p/obj/400"),
            alias: None,
        })
    }

    fn relative_date(data_set: &str, from: i32, to: i32) -> Filter {
        Filter::RelativeDate(RelativeDateFilter {
            data_set: uri_ref(data_set),
            granularity: granularity::QUARTER.to_string(),
            from,
            to,
        })
    }

    #[test]
    fn flattens_buckets_in_order() {
        let buckets = vec![
            Bucket {
                local_identifier: names::MEASURES.to_string(),
                items: vec![measure("m1", Some("Revenue"))],
                totals: Vec::new(),
            },
            Bucket {
                local_identifier: names::VIEW.to_string(),
                items: vec![attribute("a1")],
                totals: Vec::new(),
            },
        ];

        let afm = convert_buckets_to_afm(&buckets, &[]);
        assert_eq!(afm.measures.len(), 1);
        assert_eq!(afm.measures[0].alias.as_deref(), Some("Revenue"));
        assert_eq!(afm.attributes.len(), 1);
        assert!(afm.has_attribute("a1"));
    }

    #[test]
    fn drops_noop_negative_filters() {
        let filters = vec![Filter::NegativeAttribute(NegativeAttributeFilter {
            display_form: uri_ref("/gdc/md/p/obj/7"),
            values: Vec::new(),
        })];
        let afm = convert_buckets_to_afm(&[], &filters);
        assert!(afm.filters.is_empty());
    }

    #[test]
    fn last_date_filter_wins_per_data_set() {
        let filters = vec![
            relative_date("/gdc/md/p/obj/921", -3, 0),
            relative_date("/gdc/md/p/obj/555", -1, 0),
            relative_date("/gdc/md/p/obj/921", -7, 0),
        ];
        let afm = convert_buckets_to_afm(&[], &filters);
        assert_eq!(afm.filters.len(), 2);
        match &afm.filters[0] {
            Filter::RelativeDate(f) => assert_eq!(f.from, -7),
            other => panic!("unexpected filter: {other:?}"),
        }
    }

    #[test]
    fn native_totals_come_from_nat_bucket_totals() {
        let buckets = vec![Bucket {
            local_identifier: names::ATTRIBUTE.to_string(),
            items: vec![attribute("a1")],
            totals: vec![
                Total {
                    measure_identifier: "m1".to_string(),
                    total_type: TotalType::Nat,
                    attribute_identifier: "a1".to_string(),
                    alias: None,
                },
                Total {
                    measure_identifier: "m1".to_string(),
                    total_type: TotalType::Avg,
                    attribute_identifier: "a1".to_string(),
                    alias: None,
                },
            ],
        }];
        let afm = convert_buckets_to_afm(&buckets, &[]);
        assert_eq!(afm.native_totals.len(), 1);
        assert_eq!(afm.native_totals[0].attribute_identifiers, vec!["a1"]);
    }
}
