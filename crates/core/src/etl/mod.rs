//! Star-schema ETL over the financial and audit tables.
//!
//! Stages:
//! - Extract: load both sources, parse dates, check required columns
//! - Normalize: canonical numeric, flag, identifier and date types
//! - Dimensions: daily calendar plus account, department and subsidiary
//! - Facts: surrogate keys joined onto transactions and audit entries
//! - KPI: monthly totals per subsidiary and category
//! - Load: hand the seven tables to a sink

pub mod dimension;
pub mod error;
pub mod extract;
pub mod fact;
pub mod kpi;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod schema;

#[cfg(test)]
mod dimension_props;

pub use dimension::{
    DimensionIndex, DimensionSet, DimensionSpec, build_dim_date, build_dimension, date_key,
};
pub use error::EtlError;
pub use extract::{Extracted, Extractor, TableSource, parse_date};
pub use fact::{JoinPolicy, build_fact_audit, build_fact_financial};
pub use kpi::build_kpi_monthly;
pub use model::{AnalyticsModel, MemorySink, ModelSink, ModelTable};
pub use normalize::{CoerceError, ColumnKind, normalize_audit, normalize_financial};
pub use pipeline::{EtlPipeline, RunSummary};
