#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(view) = serde_json::from_str::<insight_core::DataView>(text) else {
        return;
    };

    let payload = chart_payload::build_chart_payload(&view);
    let _ = chart_payload::summarize_payload(&payload);
    let _ = insight_core::available_drill_targets(&view.result);

    if let Some(headline) = chart_payload::build_headline(&view) {
        let _ = chart_payload::format_value(
            &headline.primary_item.value,
            headline.primary_item.format.as_deref(),
        );
    }

    let _ = chart_payload::build_drill_event(&view, insight_core::VisType::Column, 0, 0);
});
