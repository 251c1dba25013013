//! Descriptor rule tables, one per visualization family.

use crate::bucket::{names, Bucket, Total};
use crate::sort::{SortDirection, SortItem};
use crate::visualization::VisType;

use super::reshape::{
    assemble, attribute_bucket, cap_attributes, collect_attributes_by_role, collect_measures,
    measure_bucket, prune_orphan_measures,
};
use super::{ExtendedReferencePoint, ReferencePoint, SortConfig, UiConfig, VisDescriptor};

const MAX_MEASURES: usize = 20;
const MAX_TABLE_ATTRIBUTES: usize = 20;

/// Column/bar/combo: view + stack, stacking excludes multiple measures.
pub struct StackedChartDescriptor {
    vis_type: VisType,
    measure_sort_by_default: bool,
}

pub static COLUMN: StackedChartDescriptor = StackedChartDescriptor {
    vis_type: VisType::Column,
    measure_sort_by_default: false,
};
pub static BAR: StackedChartDescriptor = StackedChartDescriptor {
    vis_type: VisType::Bar,
    measure_sort_by_default: true,
};
pub static COMBO: StackedChartDescriptor = StackedChartDescriptor {
    vis_type: VisType::Combo,
    measure_sort_by_default: false,
};

impl VisDescriptor for StackedChartDescriptor {
    fn vis_type(&self) -> VisType {
        self.vis_type
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: MAX_MEASURES,
            max_view_attributes: 2,
            max_stack_attributes: 1,
            max_date_attributes: 1,
            stack_caps_measures: true,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = collect_measures(reference_point);
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);

        let view = cap_attributes(
            reference_point,
            view_in,
            ui.max_view_attributes,
            ui.max_date_attributes,
        );
        let stack = cap_attributes(reference_point, stack_in, ui.max_stack_attributes, 0);

        let measure_cap = if stack.is_empty() { ui.max_measures } else { 1 };
        let measures =
            prune_orphan_measures(measures.into_iter().take(measure_cap).collect());

        let buckets = vec![
            measure_bucket(names::MEASURES, measures),
            attribute_bucket(names::VIEW, view),
            attribute_bucket(names::STACK, stack),
        ];
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        let default_sorts = if !self.measure_sort_by_default {
            Vec::new()
        } else {
            let stacked = extended
                .buckets
                .iter()
                .any(|b| b.local_identifier == names::STACK && !b.is_empty());
            let first_view = extended
                .buckets
                .iter()
                .find(|b| b.local_identifier == names::VIEW)
                .and_then(|b| b.attributes().next());
            let first_measure = extended
                .buckets
                .iter()
                .find(|b| b.local_identifier == names::MEASURES)
                .and_then(|b| b.measures().next());

            match (stacked, first_view, first_measure) {
                (true, Some(attr), _) => vec![SortItem::attribute_area(
                    attr.local_identifier.clone(),
                    SortDirection::Desc,
                )],
                (false, Some(_), Some(measure)) => vec![SortItem::measure(
                    measure.local_identifier.clone(),
                    SortDirection::Desc,
                )],
                _ => Vec::new(),
            }
        };
        SortConfig::from_buckets(&extended.buckets, default_sorts)
    }
}

/// Area: two view attributes exclude stacking; the stack bucket survives
/// only while the view holds at most one attribute.
pub struct AreaChartDescriptor;

pub static AREA: AreaChartDescriptor = AreaChartDescriptor;

impl VisDescriptor for AreaChartDescriptor {
    fn vis_type(&self) -> VisType {
        VisType::Area
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: MAX_MEASURES,
            max_view_attributes: 2,
            max_stack_attributes: 1,
            max_date_attributes: 1,
            stack_caps_measures: true,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = collect_measures(reference_point);
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);

        let view = cap_attributes(
            reference_point,
            view_in,
            ui.max_view_attributes,
            ui.max_date_attributes,
        );
        let stack = if view.len() > 1 {
            // Both view slots taken: area cannot also stack.
            Vec::new()
        } else {
            cap_attributes(reference_point, stack_in, ui.max_stack_attributes, 0)
        };

        let measure_cap = if stack.is_empty() { ui.max_measures } else { 1 };
        let measures =
            prune_orphan_measures(measures.into_iter().take(measure_cap).collect());

        let buckets = vec![
            measure_bucket(names::MEASURES, measures),
            attribute_bucket(names::VIEW, view),
            attribute_bucket(names::STACK, stack),
        ];
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        SortConfig::from_buckets(&extended.buckets, Vec::new())
    }
}

/// Line: trend + segment play the view/stack roles.
pub struct LineChartDescriptor;

pub static LINE: LineChartDescriptor = LineChartDescriptor;

impl VisDescriptor for LineChartDescriptor {
    fn vis_type(&self) -> VisType {
        VisType::Line
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: MAX_MEASURES,
            max_view_attributes: 1,
            max_stack_attributes: 1,
            max_date_attributes: 1,
            stack_caps_measures: true,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = collect_measures(reference_point);
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);

        // The second view-role attribute takes the free segment slot
        // instead of being dropped.
        let mut view_iter = view_in.into_iter();
        let trend: Vec<_> = view_iter.by_ref().take(ui.max_view_attributes).collect();
        let mut segment = cap_attributes(reference_point, stack_in, ui.max_stack_attributes, 0);
        if segment.is_empty() {
            segment.extend(view_iter.take(ui.max_stack_attributes));
        }

        let measure_cap = if segment.is_empty() { ui.max_measures } else { 1 };
        let measures =
            prune_orphan_measures(measures.into_iter().take(measure_cap).collect());

        let buckets = vec![
            measure_bucket(names::MEASURES, measures),
            attribute_bucket(names::TREND, trend),
            attribute_bucket(names::SEGMENT, segment),
        ];
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        SortConfig::from_buckets(&extended.buckets, Vec::new())
    }
}

/// Pie/donut/funnel/treemap: one sliced measure, or many measures unsliced.
pub struct RoundChartDescriptor {
    vis_type: VisType,
}

pub static PIE: RoundChartDescriptor = RoundChartDescriptor {
    vis_type: VisType::Pie,
};
pub static DONUT: RoundChartDescriptor = RoundChartDescriptor {
    vis_type: VisType::Donut,
};
pub static FUNNEL: RoundChartDescriptor = RoundChartDescriptor {
    vis_type: VisType::Funnel,
};
pub static TREEMAP: RoundChartDescriptor = RoundChartDescriptor {
    vis_type: VisType::Treemap,
};

impl VisDescriptor for RoundChartDescriptor {
    fn vis_type(&self) -> VisType {
        self.vis_type
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: MAX_MEASURES,
            max_view_attributes: 1,
            max_stack_attributes: 0,
            max_date_attributes: 1,
            stack_caps_measures: false,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = collect_measures(reference_point);
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);

        let mut attributes = view_in;
        attributes.extend(stack_in);
        let view = cap_attributes(
            reference_point,
            attributes,
            ui.max_view_attributes,
            ui.max_date_attributes,
        );

        let measure_cap = if view.is_empty() { ui.max_measures } else { 1 };
        let measures =
            prune_orphan_measures(measures.into_iter().take(measure_cap).collect());

        let buckets = vec![
            measure_bucket(names::MEASURES, measures),
            attribute_bucket(names::VIEW, view),
        ];
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        SortConfig::from_buckets(&extended.buckets, Vec::new())
    }
}

/// Table and pivot table: row attributes, column attributes (pivot only),
/// measures; totals survive for attributes that survive.
pub struct TableDescriptor {
    vis_type: VisType,
    with_columns: bool,
}

pub static TABLE: TableDescriptor = TableDescriptor {
    vis_type: VisType::Table,
    with_columns: false,
};
pub static PIVOT_TABLE: TableDescriptor = TableDescriptor {
    vis_type: VisType::PivotTable,
    with_columns: true,
};

impl VisDescriptor for TableDescriptor {
    fn vis_type(&self) -> VisType {
        self.vis_type
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: MAX_MEASURES,
            max_view_attributes: MAX_TABLE_ATTRIBUTES,
            max_stack_attributes: if self.with_columns {
                MAX_TABLE_ATTRIBUTES
            } else {
                0
            },
            max_date_attributes: MAX_TABLE_ATTRIBUTES,
            stack_caps_measures: false,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = prune_orphan_measures(
            collect_measures(reference_point)
                .into_iter()
                .take(ui.max_measures)
                .collect(),
        );
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);
        let rows = cap_attributes(
            reference_point,
            view_in,
            ui.max_view_attributes,
            ui.max_date_attributes,
        );
        let columns = cap_attributes(
            reference_point,
            stack_in,
            ui.max_stack_attributes,
            ui.max_date_attributes,
        );

        let mut row_bucket = attribute_bucket(names::ATTRIBUTE, rows);
        row_bucket.totals = surviving_totals(reference_point, &row_bucket, &measures);

        let mut buckets = vec![measure_bucket(names::MEASURES, measures), row_bucket];
        if self.with_columns {
            buckets.push(attribute_bucket(names::COLUMNS, columns));
        }
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        let first_attribute = extended
            .buckets
            .iter()
            .find(|b| b.local_identifier == names::ATTRIBUTE)
            .and_then(|b| b.attributes().next());
        let default_sorts = match first_attribute {
            Some(attribute) => vec![SortItem::attribute(
                attribute.local_identifier.clone(),
                SortDirection::Asc,
            )],
            None => extended
                .buckets
                .iter()
                .find(|b| b.local_identifier == names::MEASURES)
                .and_then(|b| b.measures().next())
                .map(|m| vec![SortItem::measure(m.local_identifier.clone(), SortDirection::Desc)])
                .unwrap_or_default(),
        };
        SortConfig::from_buckets(&extended.buckets, default_sorts)
    }
}

fn surviving_totals(
    reference_point: &ReferencePoint,
    row_bucket: &Bucket,
    measures: &[crate::measure::Measure],
) -> Vec<Total> {
    let attribute_ids = row_bucket.attribute_identifiers();
    reference_point
        .buckets
        .iter()
        .flat_map(|b| b.totals.iter())
        .filter(|total| {
            attribute_ids.contains(&total.attribute_identifier.as_str())
                && measures
                    .iter()
                    .any(|m| m.local_identifier == total.measure_identifier)
        })
        .cloned()
        .collect()
}

/// Headline: a primary and an optional secondary measure, nothing else.
pub struct HeadlineDescriptor;

pub static HEADLINE: HeadlineDescriptor = HeadlineDescriptor;

impl VisDescriptor for HeadlineDescriptor {
    fn vis_type(&self) -> VisType {
        VisType::Headline
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: 2,
            max_view_attributes: 0,
            max_stack_attributes: 0,
            max_date_attributes: 0,
            stack_caps_measures: false,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let mut measures = prune_orphan_measures(
            collect_measures(reference_point).into_iter().take(2).collect(),
        );
        let secondary = if measures.len() > 1 {
            vec![measures.remove(1)]
        } else {
            Vec::new()
        };
        let buckets = vec![
            measure_bucket(names::MEASURES, measures),
            measure_bucket(names::SECONDARY_MEASURES, secondary),
        ];
        assemble(reference_point, buckets, self.ui_config())
    }

    fn sort_config(&self, _reference_point: &ReferencePoint) -> SortConfig {
        SortConfig::unsupported()
    }
}

/// Scatter/bubble/heatmap: point-style charts with fixed measure slots.
pub struct PointsChartDescriptor {
    vis_type: VisType,
    max_measures: usize,
    view_bucket: &'static str,
    with_stack: bool,
}

pub static SCATTER: PointsChartDescriptor = PointsChartDescriptor {
    vis_type: VisType::Scatter,
    max_measures: 2,
    view_bucket: names::ATTRIBUTE,
    with_stack: false,
};
pub static BUBBLE: PointsChartDescriptor = PointsChartDescriptor {
    vis_type: VisType::Bubble,
    max_measures: 3,
    view_bucket: names::VIEW,
    with_stack: false,
};
pub static HEATMAP: PointsChartDescriptor = PointsChartDescriptor {
    vis_type: VisType::Heatmap,
    max_measures: 1,
    view_bucket: names::VIEW,
    with_stack: true,
};

impl VisDescriptor for PointsChartDescriptor {
    fn vis_type(&self) -> VisType {
        self.vis_type
    }

    fn ui_config(&self) -> UiConfig {
        UiConfig {
            max_measures: self.max_measures,
            max_view_attributes: 1,
            max_stack_attributes: if self.with_stack { 1 } else { 0 },
            max_date_attributes: 1,
            stack_caps_measures: false,
        }
    }

    fn extended_reference_point(
        &self,
        reference_point: &ReferencePoint,
    ) -> ExtendedReferencePoint {
        let ui = self.ui_config();
        let measures = prune_orphan_measures(
            collect_measures(reference_point)
                .into_iter()
                .take(ui.max_measures)
                .collect(),
        );
        let (view_in, stack_in) = collect_attributes_by_role(reference_point);
        let view = cap_attributes(
            reference_point,
            view_in,
            ui.max_view_attributes,
            ui.max_date_attributes,
        );

        let mut buckets = vec![
            measure_bucket(names::MEASURES, measures),
            attribute_bucket(self.view_bucket, view),
        ];
        if self.with_stack {
            let stack = cap_attributes(reference_point, stack_in, ui.max_stack_attributes, 0);
            buckets.push(attribute_bucket(names::STACK, stack));
        }
        assemble(reference_point, buckets, ui)
    }

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig {
        let extended = self.extended_reference_point(reference_point);
        SortConfig::from_buckets(&extended.buckets, Vec::new())
    }
}
