//! Insight analytics core: declarative visualization model and execution
//! plumbing.
//!
//! This crate provides functionality for:
//! - Modelling visualizations as buckets of measures and attributes
//! - Converting buckets into the backend execution format (AFM + result
//!   spec, including per-chart-type dimension generation)
//! - Deriving display titles for arithmetic and over-time-comparison
//!   measures
//! - Classifying and validating drill definitions against available drill
//!   targets
//! - Reshaping reference points through per-type visualization descriptors
//! - Executing requests against the backend over HTTP
//!
//! # Quick Start
//!
//! ```ignore
//! use insight_core::{convert_visualization_to_afm, generate_dimensions, ResultSpec};
//!
//! let afm = convert_visualization_to_afm(&vis);
//! let dimensions = generate_dimensions(&vis, vis.vis_type().unwrap());
//! let spec = ResultSpec { dimensions, sorts: vec![] };
//! ```

mod afm;
mod bucket;
mod conversion;
pub mod descriptors;
mod dimensions;
mod drill;
mod drill_config;
pub mod error_codes;
mod execution;
mod filter;
mod headers;
mod measure;
mod objref;
mod sort;
mod title;
mod visualization;

pub use afm::{
    Afm, AfmAttribute, AfmMeasure, Dimension, NativeTotal, ResultSpec, TotalItem, MEASURE_GROUP,
};
pub use bucket::{
    bucket_attribute_identifiers, bucket_by_name, bucket_is_populated, names as bucket_names,
    Bucket, BucketItem, Total, TotalType, VisAttribute,
};
pub use conversion::{convert_buckets_to_afm, convert_visualization_to_afm};
pub use dimensions::{
    default_dimensions, default_dimensions_for_points_charts, default_dimensions_for_round_charts,
    general_dimensions, generate_dimensions,
};
pub use drill::{
    AttributeDisplayFormMeta, AttributeUrlTarget, AvailableDrillTargetAttribute,
    AvailableDrillTargetMeasure, AvailableDrillTargets, DashboardMeta, DrillDefinition, DrillError,
    DrillOrigin, ValidationData, HYPERLINK_DISPLAY_FORM_TYPE,
};
pub use drill_config::{
    create_config, custom_url_parameters, drill_target_type, is_custom_url_valid, is_valid,
    DrillConfigItem, DrillConfigTarget, DrillOriginKind, DrillTargetType,
};
pub use execution::{
    available_drill_targets, DataValue, DataView, ExecuteError, ExecutionClient, ExecutionConfig,
    ExecutionRequest, ExecutionResult, HttpExecutionClient,
};
pub use filter::{
    granularity, AbsoluteDateFilter, ComparisonCondition, ComparisonOperator, Filter,
    MeasureFilter, MeasureValueCondition, MeasureValueFilter, NegativeAttributeFilter,
    PositiveAttributeFilter, RangeCondition, RangeOperator, RankingFilter, RankingOperator,
    RelativeDateFilter,
};
pub use headers::{
    AttributeHeader, AttributeHeaderItem, AttributeOf, DimensionHeader, MeasureHeaderItem,
};
pub use measure::{
    ArithmeticMeasureDefinition, ArithmeticOperator, Measure, MeasureAggregation,
    MeasureDefinition, PopMeasureDefinition, PreviousPeriodDateDataSet,
    PreviousPeriodMeasureDefinition, SimpleMeasureDefinition,
};
pub use objref::{id_ref, local_id_ref, uri_ref, ObjRef, ObjRefInScope};
pub use sort::{
    AttributeLocator, AttributeSortItem, Locator, MeasureLocator, MeasureSortItem, SortDirection,
    SortItem,
};
pub use title::{
    fill_derived_titles, ArithmeticTitleTemplates, DerivedTitleSuffixes, ResolvedTitle,
    TitleError, TitleResolver,
};
pub use visualization::{VisType, VisualizationClass, VisualizationObject};
