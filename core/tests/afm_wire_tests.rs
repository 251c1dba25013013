mod common;

use common::{pop_fixture, simple_measure};
use insight_core::{
    convert_visualization_to_afm, generate_dimensions, uri_ref, ExecutionRequest, MeasureDefinition,
    ResultSpec, VisType, VisualizationObject,
};

/// The "measure over time" wire JSON, as the metadata service stores it.
const POP_VISUALIZATION_JSON: &str = r##"{
    "visualizationClass": { "uri": "/gdc/md/myproject/obj/table" },
    "buckets": [
        {
            "localIdentifier": "measures",
            "items": [
                {
                    "measure": {
                        "localIdentifier": "m1",
                        "title": "# Accounts with AD Query",
                        "definition": {
                            "measureDefinition": {
                                "item": { "uri": "/gdc/md/myproject/obj/8172" }
                            }
                        }
                    }
                },
                {
                    "measure": {
                        "localIdentifier": "m1_pop",
                        "definition": {
                            "popMeasureDefinition": {
                                "measureIdentifier": "m1",
                                "popAttribute": { "uri": "/gdc/md/myproject/obj/1514" }
                            }
                        }
                    }
                },
                {
                    "measure": {
                        "localIdentifier": "m1_previous_period",
                        "definition": {
                            "previousPeriodMeasure": {
                                "measureIdentifier": "m1",
                                "dateDataSets": [
                                    {
                                        "dataSet": { "uri": "/gdc/md/myproject/obj/921" },
                                        "periodsAgo": 1
                                    }
                                ]
                            }
                        }
                    }
                }
            ]
        },
        {
            "localIdentifier": "attribute",
            "items": [
                {
                    "visualizationAttribute": {
                        "localIdentifier": "a1",
                        "displayForm": { "uri": "/gdc/md/myproject/obj/1515" }
                    }
                }
            ]
        }
    ],
    "filters": [
        {
            "relativeDateFilter": {
                "dataSet": { "uri": "/gdc/md/myproject/obj/921" },
                "granularity": "GDC.time.quarter",
                "from": -3,
                "to": 0
            }
        }
    ]
}"##;

#[test]
fn wire_json_parses_into_the_fixture_model() {
    let parsed: VisualizationObject =
        serde_json::from_str(POP_VISUALIZATION_JSON).expect("fixture JSON parses");

    assert_eq!(parsed.vis_type(), Some(VisType::Table));
    assert_eq!(parsed.measures().count(), 3);
    assert_eq!(parsed.attributes().count(), 1);
    assert!(parsed.has_derived_measure());

    let pop = parsed
        .measure_by_local_identifier("m1_pop")
        .expect("m1_pop present");
    assert_eq!(pop.master_identifier(), Some("m1"));
    assert_eq!(pop.pop_attribute(), Some(&uri_ref("/gdc/md/myproject/obj/1514")));
}

#[test]
fn wire_json_roundtrips_through_the_model() {
    let parsed: VisualizationObject =
        serde_json::from_str(POP_VISUALIZATION_JSON).expect("fixture JSON parses");
    let serialized = serde_json::to_value(&parsed).expect("model serializes");
    let expected: serde_json::Value =
        serde_json::from_str(POP_VISUALIZATION_JSON).expect("fixture JSON parses");
    assert_eq!(serialized, expected);
}

#[test]
fn conversion_flattens_the_fixture_into_an_afm() {
    let parsed: VisualizationObject =
        serde_json::from_str(POP_VISUALIZATION_JSON).expect("fixture JSON parses");
    let afm = convert_visualization_to_afm(&parsed);

    assert_eq!(afm.measures.len(), 3);
    assert_eq!(afm.measures[0].alias.as_deref(), Some("# Accounts with AD Query"));
    assert!(matches!(afm.measures[1].definition, MeasureDefinition::Pop(_)));
    assert_eq!(afm.attributes.len(), 1);
    assert_eq!(afm.attributes[0].display_form, uri_ref("/gdc/md/myproject/obj/1515"));
    assert_eq!(afm.filters.len(), 1);
}

#[test]
fn execution_request_has_the_wire_envelope_shape() {
    let vis = pop_fixture();
    let afm = convert_visualization_to_afm(&vis);
    let dimensions = generate_dimensions(&vis, VisType::Table);
    let request = ExecutionRequest {
        afm,
        result_spec: ResultSpec {
            dimensions,
            sorts: Vec::new(),
        },
    };

    let json = serde_json::to_value(&request).expect("request serializes");
    assert_eq!(
        json["resultSpec"]["dimensions"][0]["itemIdentifiers"][0],
        "a1"
    );
    assert_eq!(
        json["resultSpec"]["dimensions"][1]["itemIdentifiers"][0],
        "measureGroup"
    );
    assert_eq!(json["afm"]["measures"][0]["localIdentifier"], "m1");
    assert_eq!(
        json["afm"]["measures"][1]["definition"]["popMeasureDefinition"]["measureIdentifier"],
        "m1"
    );
}

#[test]
fn fixture_builders_match_the_wire_parse() {
    let parsed: VisualizationObject =
        serde_json::from_str(POP_VISUALIZATION_JSON).expect("fixture JSON parses");
    let built = pop_fixture();
    // The builder omits filters; compare bucket structure only.
    assert_eq!(built.buckets, parsed.buckets);
}

#[test]
fn afm_measure_definitions_keep_wire_tags() {
    let measure = simple_measure("m1", "Revenue", "/gdc/md/p/obj/1");
    let json = serde_json::to_value(&measure).expect("measure serializes");
    assert!(json["definition"]["measureDefinition"]["item"]["uri"].is_string());
    assert!(json.get("alias").is_none(), "absent alias is omitted");
    assert!(json.get("format").is_none(), "absent format is omitted");
}
