//! Headline data: primary/secondary values, the derived change percent and
//! value formatting.

use serde::Serialize;

use insight_core::{AvailableDrillTargets, DataValue, DataView};

/// Placeholder rendered for empty, null and non-numeric values.
pub const EMPTY_VALUE: &str = "–";

const DEFAULT_FORMAT: &str = "#,##0.00";
const TERTIARY_FORMAT: &str = "#,##0.00%";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineDataItem {
    pub local_identifier: String,
    pub title: String,
    pub value: DataValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub is_drillable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineData {
    pub primary_item: HeadlineDataItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_item: Option<HeadlineDataItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary_item: Option<HeadlineDataItem>,
}

/// Builds headline data from a single-measure-group execution. The first
/// measure is the primary item, the second the secondary; with both
/// present a tertiary percent-change item is derived.
pub fn build_headline(view: &DataView) -> Option<HeadlineData> {
    let measures = view.result.measure_header_items();
    let values = view.result.raw_data.first();
    let value_at = |index: usize| -> DataValue {
        values.and_then(|row| row.get(index).cloned()).flatten()
    };

    let primary_header = measures.first()?;
    let primary_item = HeadlineDataItem {
        local_identifier: primary_header.local_identifier.clone(),
        title: primary_header.name.clone(),
        value: value_at(0),
        format: primary_header.format.clone(),
        is_drillable: false,
    };

    let secondary_item = measures.get(1).map(|header| HeadlineDataItem {
        local_identifier: header.local_identifier.clone(),
        title: header.name.clone(),
        value: value_at(1),
        format: header.format.clone(),
        is_drillable: false,
    });

    let tertiary_item = secondary_item.as_ref().map(|secondary| {
        let change = percent_change(&primary_item.value, &secondary.value);
        HeadlineDataItem {
            local_identifier: "tertiaryIdentifier".to_string(),
            title: "Versus".to_string(),
            value: change.map(|v| v.to_string()),
            format: Some(TERTIARY_FORMAT.to_string()),
            is_drillable: false,
        }
    });

    Some(HeadlineData {
        primary_item,
        secondary_item,
        tertiary_item,
    })
}

/// Percent change of primary versus secondary. Null when either value is
/// missing or non-numeric, and when the secondary is zero (no meaningful
/// baseline); zero primary against a baseline yields -100.
pub fn percent_change(primary: &DataValue, secondary: &DataValue) -> Option<f64> {
    let primary = parse(primary)?;
    let secondary = parse(secondary)?;
    if secondary == 0.0 {
        return None;
    }
    Some((primary - secondary) / secondary * 100.0)
}

fn parse(value: &DataValue) -> Option<f64> {
    value.as_deref().and_then(|v| v.trim().parse::<f64>().ok())
}

/// Marks items whose measure the execution exposes as drillable. Always
/// resets state first, so a shrinking target set clears stale flags.
pub fn mark_drillable(data: &HeadlineData, targets: &AvailableDrillTargets) -> HeadlineData {
    let mark = |item: &HeadlineDataItem| -> HeadlineDataItem {
        HeadlineDataItem {
            is_drillable: targets.measure(&item.local_identifier).is_some(),
            ..item.clone()
        }
    };
    HeadlineData {
        primary_item: mark(&data.primary_item),
        secondary_item: data.secondary_item.as_ref().map(&mark),
        // The derived item never drills; it has no backing measure.
        tertiary_item: data.tertiary_item.as_ref().map(|item| HeadlineDataItem {
            is_drillable: false,
            ..item.clone()
        }),
    }
}

/// A formatted value with the style its format directives requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl FormattedValue {
    fn plain(text: impl Into<String>) -> FormattedValue {
        FormattedValue {
            text: text.into(),
            color: None,
            background: None,
        }
    }
}

/// Formats a raw headline value.
///
/// Empty, null and non-numeric values render the en-dash placeholder unless
/// the format carries a `[=null]` section, which then wins. Numeric values
/// go through the numeric mask of the first non-conditional section, with
/// color directives extracted into the style.
pub fn format_value(value: &DataValue, format: Option<&str>) -> FormattedValue {
    let format = format.unwrap_or(DEFAULT_FORMAT);
    let sections: Vec<&str> = format.split(';').collect();
    let null_section = sections.iter().find(|s| s.contains("[=null]"));

    match parse(value) {
        Some(number) => {
            let base = sections
                .iter()
                .find(|s| !s.contains("[=null]"))
                .copied()
                .unwrap_or(DEFAULT_FORMAT);
            let (pattern, color, background) = extract_directives(base);
            let mut formatted = format_number(number, &pattern);
            formatted.color = color;
            formatted.background = background;
            formatted
        }
        None => match null_section {
            Some(section) => {
                let stripped = section.replace("[=null]", "");
                let (text, color, background) = extract_directives(&stripped);
                FormattedValue {
                    text,
                    color,
                    background,
                }
            }
            None => FormattedValue::plain(EMPTY_VALUE),
        },
    }
}

/// Splits `[red]`/`[color(...)]`/`[backgroundColor(...)]` directives from a
/// format section, returning the remaining pattern text.
fn extract_directives(section: &str) -> (String, Option<String>, Option<String>) {
    const NAMED: [(&str, &str); 8] = [
        ("red", "FF0000"),
        ("green", "00FF00"),
        ("blue", "0000FF"),
        ("yellow", "FFFF00"),
        ("cyan", "00FFFF"),
        ("magenta", "FF00FF"),
        ("white", "FFFFFF"),
        ("black", "000000"),
    ];

    let mut pattern = String::with_capacity(section.len());
    let mut color = None;
    let mut background = None;
    let mut rest = section;

    while let Some(start) = rest.find('[') {
        pattern.push_str(&rest[..start]);
        let Some(end) = rest[start..].find(']') else {
            pattern.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let directive = &rest[start + 1..start + end];
        rest = &rest[start + end + 1..];

        let lower = directive.to_ascii_lowercase();
        if let Some(hex) = lower.strip_prefix("color(").and_then(|s| s.strip_suffix(')')) {
            color = Some(format!("#{}", hex.to_ascii_uppercase()));
        } else if let Some(hex) = lower
            .strip_prefix("backgroundcolor(")
            .and_then(|s| s.strip_suffix(')'))
        {
            background = Some(format!("#{}", hex.to_ascii_uppercase()));
        } else if let Some((_, hex)) = NAMED.iter().find(|(name, _)| *name == lower) {
            color = Some(format!("#{hex}"));
        } else {
            // Unknown bracket content is kept verbatim (e.g. conditions).
            pattern.push('[');
            pattern.push_str(directive);
            pattern.push(']');
        }
    }
    pattern.push_str(rest);
    (pattern, color, background)
}

/// Applies a numeric mask (`#,##0.00`-style) to a value, keeping literal
/// prefix/suffix text. A `%` suffix scales by 100.
fn format_number(value: f64, pattern: &str) -> FormattedValue {
    let mask_chars = ['#', '0', ',', '.'];
    let start = pattern.find(|c| mask_chars.contains(&c));
    let Some(start) = start else {
        // No mask at all: the section is literal text.
        return FormattedValue::plain(pattern.to_string());
    };
    let end = pattern[start..]
        .find(|c| !mask_chars.contains(&c))
        .map(|offset| start + offset)
        .unwrap_or(pattern.len());

    let prefix = &pattern[..start];
    let mask = &pattern[start..end];
    let suffix = &pattern[end..];

    let value = if suffix.contains('%') { value * 100.0 } else { value };
    let decimals = mask
        .rsplit_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0);
    let grouped = mask.contains(',');

    let unsigned = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (unsigned, None),
    };
    let int_part = if grouped {
        group_thousands(&int_part)
    } else {
        int_part
    };

    let mut text = String::new();
    if value < 0.0 {
        text.push('-');
    }
    text.push_str(prefix);
    text.push_str(&int_part);
    if let Some(frac) = frac_part {
        text.push('.');
        text.push_str(&frac);
    }
    text.push_str(suffix);
    FormattedValue::plain(text)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (index, c) in chars.iter().enumerate() {
        if index > 0 && (chars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    grouped
}
