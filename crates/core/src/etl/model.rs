//! The analytics model and the sink it is written to.

use std::fmt;

use ledgerstar_shared::Table;

use super::error::EtlError;

/// The seven model tables, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelTable {
    /// Daily calendar.
    DimDate,
    /// Chart of accounts.
    DimAccount,
    /// Departments with cost centers.
    DimDepartment,
    /// Subsidiaries.
    DimSubsidiary,
    /// One row per transaction.
    FactFinancial,
    /// One row per audit entry.
    FactAudit,
    /// Monthly aggregate.
    KpiMonthly,
}

impl ModelTable {
    /// All tables, in load order.
    pub const ALL: [Self; 7] = [
        Self::DimDate,
        Self::DimAccount,
        Self::DimDepartment,
        Self::DimSubsidiary,
        Self::FactFinancial,
        Self::FactAudit,
        Self::KpiMonthly,
    ];

    /// Table name, also used as the output file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DimDate => "DimDate",
            Self::DimAccount => "DimAccount",
            Self::DimDepartment => "DimDepartment",
            Self::DimSubsidiary => "DimSubsidiary",
            Self::FactFinancial => "FactFinancial",
            Self::FactAudit => "FactAudit",
            Self::KpiMonthly => "KpiMonthly",
        }
    }
}

impl fmt::Display for ModelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsModel {
    /// `DimDate`.
    pub dim_date: Table,
    /// `DimAccount`.
    pub dim_account: Table,
    /// `DimDepartment`.
    pub dim_department: Table,
    /// `DimSubsidiary`.
    pub dim_subsidiary: Table,
    /// `FactFinancial`.
    pub fact_financial: Table,
    /// `FactAudit`.
    pub fact_audit: Table,
    /// `KpiMonthly`.
    pub kpi_monthly: Table,
}

impl AnalyticsModel {
    /// Returns one model table.
    #[must_use]
    pub const fn table(&self, which: ModelTable) -> &Table {
        match which {
            ModelTable::DimDate => &self.dim_date,
            ModelTable::DimAccount => &self.dim_account,
            ModelTable::DimDepartment => &self.dim_department,
            ModelTable::DimSubsidiary => &self.dim_subsidiary,
            ModelTable::FactFinancial => &self.fact_financial,
            ModelTable::FactAudit => &self.fact_audit,
            ModelTable::KpiMonthly => &self.kpi_monthly,
        }
    }

    /// Iterates over all tables in load order.
    pub fn tables(&self) -> impl Iterator<Item = (ModelTable, &Table)> {
        ModelTable::ALL.into_iter().map(|t| (t, self.table(t)))
    }
}

/// Destination of a load.
pub trait ModelSink {
    /// Where the tables end up, for logging.
    fn location(&self) -> String;

    /// Writes one table.
    ///
    /// # Errors
    ///
    /// Returns `EtlError::Sink` if the table cannot be written.
    fn write_table(&mut self, table: ModelTable, data: &Table) -> Result<(), EtlError>;
}

/// Sink collecting tables in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Tables in the order they were written.
    pub written: Vec<(ModelTable, Table)>,
}

impl ModelSink for MemorySink {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn write_table(&mut self, table: ModelTable, data: &Table) -> Result<(), EtlError> {
        self.written.push((table, data.clone()));
        Ok(())
    }
}
