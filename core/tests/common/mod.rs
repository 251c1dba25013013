//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use insight_core::{
    uri_ref, ArithmeticMeasureDefinition, ArithmeticOperator, Bucket, BucketItem, Filter, Measure,
    MeasureDefinition, PopMeasureDefinition, PreviousPeriodDateDataSet,
    PreviousPeriodMeasureDefinition, SimpleMeasureDefinition, Total, TotalType, VisAttribute,
    VisualizationClass, VisualizationObject,
};

pub fn simple_measure(local_id: &str, title: &str, uri: &str) -> Measure {
    Measure {
        local_identifier: local_id.to_string(),
        definition: MeasureDefinition::Simple(SimpleMeasureDefinition {
            item: uri_ref(uri),
            aggregation: None,
            filters: Vec::new(),
            compute_ratio: false,
        }),
        title: Some(title.to_string()),
        alias: None,
        format: None,
    }
}

pub fn pop_measure(local_id: &str, master: &str, attribute_uri: &str) -> Measure {
    Measure {
        local_identifier: local_id.to_string(),
        definition: MeasureDefinition::Pop(PopMeasureDefinition {
            measure_identifier: master.to_string(),
            pop_attribute: uri_ref(attribute_uri),
        }),
        title: None,
        alias: None,
        format: None,
    }
}

pub fn previous_period_measure(local_id: &str, master: &str, data_set_uri: &str) -> Measure {
    Measure {
        local_identifier: local_id.to_string(),
        definition: MeasureDefinition::PreviousPeriod(PreviousPeriodMeasureDefinition {
            measure_identifier: master.to_string(),
            date_data_sets: vec![PreviousPeriodDateDataSet {
                data_set: uri_ref(data_set_uri),
                periods_ago: 1,
            }],
        }),
        title: None,
        alias: None,
        format: None,
    }
}

pub fn arithmetic_measure(
    local_id: &str,
    operator: ArithmeticOperator,
    operands: &[&str],
) -> Measure {
    Measure {
        local_identifier: local_id.to_string(),
        definition: MeasureDefinition::Arithmetic(ArithmeticMeasureDefinition {
            measure_identifiers: operands.iter().map(|s| s.to_string()).collect(),
            operator,
        }),
        title: None,
        alias: None,
        format: None,
    }
}

pub fn attribute(local_id: &str, display_form_uri: &str) -> VisAttribute {
    VisAttribute {
        local_identifier: local_id.to_string(),
        display_form: uri_ref(display_form_uri),
        alias: None,
    }
}

pub fn measure_bucket(name: &str, measures: Vec<Measure>) -> Bucket {
    Bucket {
        local_identifier: name.to_string(),
        items: measures.into_iter().map(BucketItem::Measure).collect(),
        totals: Vec::new(),
    }
}

pub fn attribute_bucket(name: &str, attributes: Vec<VisAttribute>) -> Bucket {
    Bucket {
        local_identifier: name.to_string(),
        items: attributes.into_iter().map(BucketItem::Attribute).collect(),
        totals: Vec::new(),
    }
}

pub fn attribute_bucket_with_totals(
    name: &str,
    attributes: Vec<VisAttribute>,
    totals: Vec<Total>,
) -> Bucket {
    Bucket {
        totals,
        ..attribute_bucket(name, attributes)
    }
}

pub fn avg_total(measure: &str, attribute: &str) -> Total {
    Total {
        measure_identifier: measure.to_string(),
        total_type: TotalType::Avg,
        attribute_identifier: attribute.to_string(),
        alias: Some("average".to_string()),
    }
}

pub fn visualization(class: &str, buckets: Vec<Bucket>) -> VisualizationObject {
    VisualizationObject {
        visualization_class: VisualizationClass {
            uri: format!("/gdc/md/myproject/obj/{class}"),
        },
        buckets,
        filters: Vec::new(),
        sorts: Vec::new(),
        properties: None,
    }
}

pub fn visualization_with_filters(
    class: &str,
    buckets: Vec<Bucket>,
    filters: Vec<Filter>,
) -> VisualizationObject {
    VisualizationObject {
        filters,
        ..visualization(class, buckets)
    }
}

/// The "measure over time" fixture: master measure `m1` titled
/// "# Accounts with AD Query", its PoP and previous-period derivations,
/// and the `a1` view attribute.
pub fn pop_fixture() -> VisualizationObject {
    visualization(
        "table",
        vec![
            measure_bucket(
                "measures",
                vec![
                    simple_measure("m1", "# Accounts with AD Query", "/gdc/md/myproject/obj/8172"),
                    pop_measure("m1_pop", "m1", "/gdc/md/myproject/obj/1514"),
                    previous_period_measure("m1_previous_period", "m1", "/gdc/md/myproject/obj/921"),
                ],
            ),
            attribute_bucket(
                "attribute",
                vec![attribute("a1", "/gdc/md/myproject/obj/1515")],
            ),
        ],
    )
}
