//! Sort items attached to a result spec or stored in visualization
//! properties.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSortItem {
    pub attribute_identifier: String,
    pub direction: SortDirection,
    /// Set to aggregate the attribute's rows before sorting ("area sort"
    /// used by stacked charts). The only supported function is `sum`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeLocator {
    pub attribute_identifier: String,
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureLocator {
    pub measure_identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Locator {
    #[serde(rename = "attributeLocatorItem")]
    Attribute(AttributeLocator),
    #[serde(rename = "measureLocatorItem")]
    Measure(MeasureLocator),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureSortItem {
    pub direction: SortDirection,
    pub locators: Vec<Locator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortItem {
    #[serde(rename = "attributeSortItem")]
    Attribute(AttributeSortItem),
    #[serde(rename = "measureSortItem")]
    Measure(MeasureSortItem),
}

impl SortItem {
    pub fn attribute(identifier: impl Into<String>, direction: SortDirection) -> SortItem {
        SortItem::Attribute(AttributeSortItem {
            attribute_identifier: identifier.into(),
            direction,
            aggregation: None,
        })
    }

    /// Area sort: attribute sort with sum aggregation, used by stacked
    /// charts where plain element order is meaningless.
    pub fn attribute_area(identifier: impl Into<String>, direction: SortDirection) -> SortItem {
        SortItem::Attribute(AttributeSortItem {
            attribute_identifier: identifier.into(),
            direction,
            aggregation: Some("sum".to_string()),
        })
    }

    pub fn measure(identifier: impl Into<String>, direction: SortDirection) -> SortItem {
        SortItem::Measure(MeasureSortItem {
            direction,
            locators: vec![Locator::Measure(MeasureLocator {
                measure_identifier: identifier.into(),
            })],
        })
    }

    /// Local identifiers this sort references (attribute identifier, or all
    /// locator identifiers of a measure sort).
    pub fn referenced_identifiers(&self) -> Vec<&str> {
        match self {
            SortItem::Attribute(item) => vec![item.attribute_identifier.as_str()],
            SortItem::Measure(item) => item
                .locators
                .iter()
                .map(|locator| match locator {
                    Locator::Attribute(l) => l.attribute_identifier.as_str(),
                    Locator::Measure(l) => l.measure_identifier.as_str(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_items_match_wire_shape() {
        let sort = SortItem::attribute("a1", SortDirection::Asc);
        let json = serde_json::to_value(&sort).expect("serialize");
        assert_eq!(json["attributeSortItem"]["attributeIdentifier"], "a1");
        assert_eq!(json["attributeSortItem"]["direction"], "asc");

        let sort = SortItem::measure("m1", SortDirection::Desc);
        let json = serde_json::to_value(&sort).expect("serialize");
        assert_eq!(
            json["measureSortItem"]["locators"][0]["measureLocatorItem"]["measureIdentifier"],
            "m1"
        );
    }

    #[test]
    fn referenced_identifiers_cover_all_locators() {
        let sort = SortItem::Measure(MeasureSortItem {
            direction: SortDirection::Desc,
            locators: vec![
                Locator::Attribute(AttributeLocator {
                    attribute_identifier: "a1".to_string(),
                    element: "/gdc/md/p/obj/1?id=5".to_string(),
                }),
                Locator::Measure(MeasureLocator {
                    measure_identifier: "m1".to_string(),
                }),
            ],
        });
        assert_eq!(sort.referenced_identifiers(), vec!["a1", "m1"]);
    }
}
