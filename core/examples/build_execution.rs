use insight_core::{
    bucket_names, convert_visualization_to_afm, generate_dimensions, Bucket, BucketItem,
    ExecutionRequest, Measure, MeasureDefinition, ResultSpec, SimpleMeasureDefinition, VisAttribute,
    VisualizationClass, VisualizationObject,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vis = VisualizationObject {
        visualization_class: VisualizationClass {
            uri: "/gdc/md/demo/obj/column".to_string(),
        },
        buckets: vec![
            Bucket {
                local_identifier: bucket_names::MEASURES.to_string(),
                items: vec![BucketItem::Measure(Measure {
                    local_identifier: "m1".to_string(),
                    definition: MeasureDefinition::Simple(SimpleMeasureDefinition {
                        item: insight_core::uri_ref("/gdc/md/demo/obj/1"),
                        aggregation: None,
                        filters: Vec::new(),
                        compute_ratio: false,
                    }),
                    title: Some("Revenue".to_string()),
                    alias: None,
                    format: Some("$#,##0.00".to_string()),
                })],
                totals: Vec::new(),
            },
            Bucket {
                local_identifier: bucket_names::VIEW.to_string(),
                items: vec![BucketItem::Attribute(VisAttribute {
                    local_identifier: "a1".to_string(),
                    display_form: insight_core::uri_ref("/gdc/md/demo/obj/2"),
                    alias: None,
                })],
                totals: Vec::new(),
            },
        ],
        filters: Vec::new(),
        sorts: Vec::new(),
        properties: None,
    };

    let vis_type = vis.vis_type().ok_or("unknown visualization class")?;
    let request = ExecutionRequest {
        afm: convert_visualization_to_afm(&vis),
        result_spec: ResultSpec {
            dimensions: generate_dimensions(&vis, vis_type),
            sorts: Vec::new(),
        },
    };

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
