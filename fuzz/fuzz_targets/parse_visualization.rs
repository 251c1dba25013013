#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(vis) = serde_json::from_str::<insight_core::VisualizationObject>(text) else {
        return;
    };

    // The downstream pipeline is total: whatever deserializes must convert
    // and generate dimensions for every type without panicking.
    let afm = insight_core::convert_visualization_to_afm(&vis);
    let _ = insight_core::general_dimensions(&afm);
    for vis_type in insight_core::VisType::ALL {
        let dimensions = insight_core::generate_dimensions(&vis, vis_type);
        assert!(dimensions.len() <= 2);

        let descriptor = insight_core::descriptors::descriptor(vis_type);
        let reference_point = insight_core::descriptors::ReferencePoint {
            buckets: vis.buckets.clone(),
            filters: vis.filters.clone(),
            sorts: vis.sorts.clone(),
            date_display_forms: Vec::new(),
        };
        let _ = descriptor.extended_reference_point(&reference_point);
        let _ = descriptor.sort_config(&reference_point);
    }

    let measures: Vec<insight_core::Measure> = vis.measures().cloned().collect();
    let _ = insight_core::TitleResolver::default().resolve(&measures);
});
