//! ETL pipeline orchestration.

use tracing::info;

use super::dimension::DimensionSet;
use super::error::EtlError;
use super::extract::{Extracted, Extractor, TableSource};
use super::fact::{JoinPolicy, build_fact_audit, build_fact_financial};
use super::kpi::build_kpi_monthly;
use super::model::{AnalyticsModel, ModelSink, ModelTable};
use super::normalize::{normalize_audit, normalize_financial};

/// Row counts of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written per table, in load order.
    pub rows: Vec<(ModelTable, usize)>,
    /// Where the model was written.
    pub location: String,
}

impl RunSummary {
    /// Rows written for one table.
    #[must_use]
    pub fn rows_for(&self, table: ModelTable) -> Option<usize> {
        self.rows.iter().find(|(t, _)| *t == table).map(|(_, n)| *n)
    }
}

/// Extract, transform and load over two table sources.
#[derive(Debug)]
pub struct EtlPipeline<F, A> {
    financial: F,
    audit: A,
    join_policy: JoinPolicy,
}

impl<F: TableSource, A: TableSource> EtlPipeline<F, A> {
    /// Creates a pipeline with the permissive join policy.
    pub fn new(financial: F, audit: A) -> Self {
        Self {
            financial,
            audit,
            join_policy: JoinPolicy::default(),
        }
    }

    /// Sets how unmatched dimension joins are handled.
    #[must_use]
    pub fn with_join_policy(mut self, join_policy: JoinPolicy) -> Self {
        self.join_policy = join_policy;
        self
    }

    /// Loads both sources and checks their schemas.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract`].
    pub fn extract(&self) -> Result<Extracted, EtlError> {
        Extractor::extract(&self.financial, &self.audit)
    }

    /// Builds the analytics model from extracted tables.
    ///
    /// # Errors
    ///
    /// Returns `EtlError::OutOfRange` for numbers outside the decimal range,
    /// `EtlError::Schema` if a natural-key column is absent, or
    /// `EtlError::UnmatchedDimension` under a strict join policy.
    pub fn transform(&self, extracted: &Extracted) -> Result<AnalyticsModel, EtlError> {
        let financial = normalize_financial(&extracted.financial)?;
        let audit = normalize_audit(&extracted.audit)?;

        let dimensions = DimensionSet::build(&financial)?;
        let fact_financial = build_fact_financial(&financial, &dimensions, self.join_policy)?;
        let fact_audit = build_fact_audit(&audit, &fact_financial)?;
        let kpi_monthly = build_kpi_monthly(&financial)?;

        let DimensionSet {
            date,
            account,
            department,
            subsidiary,
        } = dimensions;

        Ok(AnalyticsModel {
            dim_date: date,
            dim_account: account,
            dim_department: department,
            dim_subsidiary: subsidiary,
            fact_financial,
            fact_audit,
            kpi_monthly,
        })
    }

    /// Writes every model table to `sink`, in load order.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure.
    pub fn load<S: ModelSink + ?Sized>(
        model: &AnalyticsModel,
        sink: &mut S,
    ) -> Result<Vec<(ModelTable, usize)>, EtlError> {
        model
            .tables()
            .map(|(table, data)| {
                sink.write_table(table, data)?;
                info!(table = %table, rows = data.len(), "Model table written");
                Ok((table, data.len()))
            })
            .collect()
    }

    /// Runs extract, transform and load.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage. Nothing is written unless
    /// extract and transform succeed.
    pub fn run<S: ModelSink + ?Sized>(&self, sink: &mut S) -> Result<RunSummary, EtlError> {
        let extracted = self.extract()?;
        let model = self.transform(&extracted)?;
        let rows = Self::load(&model, sink)?;

        let summary = RunSummary {
            rows,
            location: sink.location(),
        };
        info!(location = %summary.location, "ETL completed");
        Ok(summary)
    }
}
