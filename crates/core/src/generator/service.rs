//! Dataset generation service.
//!
//! Randomness always comes from the `rng` argument. Two runs with equally
//! seeded generators and equal params produce identical datasets.

use chrono::{Days, NaiveDate};
use ledgerstar_shared::config::GeneratorSettings;
use rand::Rng;
use rand::seq::{IndexedRandom, index};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::catalog::{
    BANK_ACCOUNTS, CURRENCIES, CUSTOMER_COUNT, DEPARTMENTS, GL_ACCOUNTS, GROUP_COMPANY,
    INTERCOMPANY_PAIRS, MEMOS, PAYMENT_TERMS, REPORTING_SEGMENTS, SUBSIDIARIES, TAX_CODES,
    TRANSACTION_TYPES, USER_COUNT, VENDOR_COUNT,
};
use super::error::GeneratorError;
use super::types::{
    AgingBucket, AuditAction, AuditRecord, CashflowType, Category, FinancialRecord,
    TransactionStatus,
};
use super::validation::validate_dataset;
use crate::currency::{FX_RATE_DECIMALS, to_group_currency};

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Number of financial rows.
    pub rows: usize,
    /// First possible posting date.
    pub start_date: NaiveDate,
    /// Width of the posting window in days; also offsets the as-of date.
    pub days: u32,
    /// Group currency code.
    pub group_currency: String,
    /// Share of rows turned intercompany, in percent.
    pub intercompany_percent: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self::from(&GeneratorSettings::default())
    }
}

impl From<&GeneratorSettings> for GeneratorParams {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            rows: settings.rows,
            start_date: settings.start_date,
            days: settings.days,
            group_currency: settings.group_currency.clone(),
            intercompany_percent: settings.intercompany_percent,
        }
    }
}

impl GeneratorParams {
    /// Checks the parameters before anything is drawn.
    ///
    /// # Errors
    ///
    /// Returns an error for zero rows, an empty window, or a percent above 100.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.rows == 0 {
            return Err(GeneratorError::InvalidRowCount(self.rows));
        }
        if self.days == 0 {
            return Err(GeneratorError::EmptyPostingWindow);
        }
        if self.intercompany_percent > 100 {
            return Err(GeneratorError::InvalidIntercompanyPercent(
                self.intercompany_percent,
            ));
        }
        Ok(())
    }

    /// Date against which overdue days are measured.
    #[must_use]
    pub fn as_of_date(&self) -> NaiveDate {
        self.start_date + Days::new(u64::from(self.days))
    }

    /// Number of rows turned into intercompany transactions.
    #[must_use]
    pub fn intercompany_rows(&self) -> usize {
        self.rows * self.intercompany_percent as usize / 100
    }
}

/// A financial table with its derived audit journal.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDataset {
    /// Transactions.
    pub financial: Vec<FinancialRecord>,
    /// Audit journal entries.
    pub audit: Vec<AuditRecord>,
}

/// Service generating synthetic ledger data.
pub struct DatasetGenerator;

impl DatasetGenerator {
    /// Generates transactions and audit journals, then validates them.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid params or if validation fails.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        params: &GeneratorParams,
    ) -> Result<GeneratedDataset, GeneratorError> {
        let financial = Self::generate_financial(rng, params)?;
        let audit = Self::generate_audit_journals(rng, &financial);
        validate_dataset(&financial, &audit)?;
        info!(
            financial_rows = financial.len(),
            audit_rows = audit.len(),
            "Validation checks passed"
        );
        Ok(GeneratedDataset { financial, audit })
    }

    /// Generates the flat transaction table.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` are invalid.
    pub fn generate_financial<R: Rng + ?Sized>(
        rng: &mut R,
        params: &GeneratorParams,
    ) -> Result<Vec<FinancialRecord>, GeneratorError> {
        params.validate()?;

        let mut rows = (0..params.rows)
            .map(|i| Self::draw_transaction(rng, params, i))
            .collect::<Result<Vec<_>, _>>()?;

        let intercompany = params.intercompany_rows();
        Self::apply_intercompany(rng, &mut rows, intercompany)?;

        info!(rows = rows.len(), intercompany, "Financial dataset generated");
        Ok(rows)
    }

    /// Derives the audit journal: 1 to 3 entries per transaction.
    pub fn generate_audit_journals<R: Rng + ?Sized>(
        rng: &mut R,
        financial: &[FinancialRecord],
    ) -> Vec<AuditRecord> {
        let mut journal = Vec::with_capacity(financial.len() * 2);
        let mut next_id: u64 = 1;
        let mut push = |journal: &mut Vec<AuditRecord>, record: AuditRecord| {
            journal.push(AuditRecord {
                audit_id: next_id,
                ..record
            });
            next_id += 1;
        };

        for tx in financial {
            let entry = |action_type: AuditAction,
                         performed_by: String,
                         performed_on: NaiveDate,
                         memo: &str| AuditRecord {
                audit_id: 0,
                document_no: tx.document_no.clone(),
                action_type,
                performed_by,
                performed_on,
                previous_amount: None,
                new_amount: Some(tx.amount),
                previous_status: None,
                new_status: Some(tx.status),
                memo: memo.to_string(),
                cost_center: tx.cost_center.clone(),
                subsidiary: tx.subsidiary.clone(),
                intercompany_flag: tx.intercompany_flag,
            };

            push(
                &mut journal,
                entry(
                    AuditAction::Created,
                    tx.posted_by.clone(),
                    tx.posting_date,
                    &tx.memo,
                ),
            );

            if tx.approved == 1 {
                let hours: u64 = rng.random_range(1..48);
                let approver = random_user(rng);
                push(
                    &mut journal,
                    AuditRecord {
                        previous_status: Some(tx.status),
                        new_status: Some(TransactionStatus::Posted),
                        ..entry(
                            AuditAction::ApprovedPosted,
                            approver,
                            tx.posting_date + Days::new(hours / 24),
                            "Approved by reviewer",
                        )
                    },
                );
            }

            if tx.cost_adjustment_flag == 1 || tx.status == TransactionStatus::Reversed {
                let delay: u64 = rng.random_range(1..5);
                let adjuster = random_user(rng);
                let delta = Decimal::from(rng.random_range(-500_i64..500));
                push(
                    &mut journal,
                    AuditRecord {
                        previous_amount: Some(tx.amount),
                        new_amount: Some(tx.amount + delta),
                        previous_status: Some(tx.status),
                        ..entry(
                            AuditAction::AdjustedReversed,
                            adjuster,
                            tx.posting_date + Days::new(delay),
                            "Adjustment entry",
                        )
                    },
                );
            }
        }

        info!(rows = journal.len(), "Audit journals generated");
        journal
    }

    fn draw_transaction<R: Rng + ?Sized>(
        rng: &mut R,
        params: &GeneratorParams,
        index: usize,
    ) -> Result<FinancialRecord, GeneratorError> {
        let posting_date =
            params.start_date + Days::new(rng.random_range(0..u64::from(params.days)));
        let subsidiary = *pick(rng, "subsidiaries", &SUBSIDIARIES)?;
        let (department, cost_center) = *pick(rng, "departments", &DEPARTMENTS)?;
        let account = *pick(rng, "gl accounts", &GL_ACCOUNTS)?;

        let amount = amount_for_category(rng, account.category);
        let currency = *pick(rng, "currencies", &CURRENCIES)?;
        let fx_rate = Decimal::new(rng.random_range(5_000_i64..15_000), FX_RATE_DECIMALS);
        let amount_group_currency = to_group_currency(amount, fx_rate);

        let cost_adjustment_flag: u8 =
            *pick_weighted(rng, "cost adjustment", &[(0, 95), (1, 5)])?;
        let original_doc_no = if cost_adjustment_flag == 1 {
            document_number(rng.random_range(1..=params.rows))
        } else {
            String::new()
        };

        let cashflow_type = if account.category == Category::Revenue {
            CashflowType::Inflow
        } else {
            CashflowType::Outflow
        };
        let expected_cashflow_date = posting_date + Days::new(rng.random_range(0..90));

        let payment_term_days = *pick_weighted(rng, "payment terms", &PAYMENT_TERMS)?;
        let due_date = posting_date + Days::new(u64::from(payment_term_days));
        let days_overdue = (params.as_of_date() - due_date).num_days().max(0);

        let counterparty_id = if account.category == Category::Revenue {
            format!("CUSTOMER_{:03}", rng.random_range(1..=CUSTOMER_COUNT))
        } else {
            format!("VENDOR_{:03}", rng.random_range(1..=VENDOR_COUNT))
        };

        Ok(FinancialRecord {
            posting_date,
            subsidiary: subsidiary.to_string(),
            group_company: GROUP_COMPANY.to_string(),
            department: department.to_string(),
            cost_center: cost_center.to_string(),
            reporting_segment: (*pick(rng, "reporting segments", &REPORTING_SEGMENTS)?)
                .to_string(),
            account_no: account.number.to_string(),
            account_name: account.name.to_string(),
            category: account.category,
            ifrs_standard: account.ifrs_standard.to_string(),
            amount,
            amount_group_currency,
            group_currency: params.group_currency.clone(),
            document_no: document_number(index + 1),
            counterparty_id,
            currency: currency.to_string(),
            fx_rate,
            transaction_type: (*pick(rng, "transaction types", &TRANSACTION_TYPES)?).to_string(),
            bank_account: (*pick(rng, "bank accounts", &BANK_ACCOUNTS)?).to_string(),
            posted_by: random_user(rng),
            approved: *pick_weighted(rng, "approval", &[(0, 10), (1, 90)])?,
            status: *pick(rng, "statuses", &TransactionStatus::ALL)?,
            memo: (*pick_weighted(rng, "memos", &MEMOS)?).to_string(),
            tax_code: (*pick(rng, "tax codes", &TAX_CODES)?).to_string(),
            intercompany_flag: 0,
            intercompany_to: String::new(),
            cashflow_type,
            expected_cashflow_date,
            payment_term_days,
            due_date,
            days_overdue,
            aging_bucket: AgingBucket::from_days_overdue(days_overdue),
            cost_adjustment_flag,
            original_doc_no,
        })
    }

    fn apply_intercompany<R: Rng + ?Sized>(
        rng: &mut R,
        rows: &mut [FinancialRecord],
        count: usize,
    ) -> Result<(), GeneratorError> {
        if count == 0 || rows.is_empty() {
            return Ok(());
        }

        for idx in index::sample(rng, rows.len(), count.min(rows.len())) {
            let (from, to) = *pick(rng, "intercompany pairs", &INTERCOMPANY_PAIRS)?;
            let (department, cost_center) = *pick(rng, "departments", &DEPARTMENTS)?;
            let row = &mut rows[idx];

            row.subsidiary = from.to_string();
            row.intercompany_to = to.to_string();
            row.department = department.to_string();
            row.cost_center = cost_center.to_string();
            row.intercompany_flag = 1;
            row.counterparty_id = to.to_string();

            // Directional amounts: only revenue stays positive.
            if row.category != Category::Revenue {
                row.amount = -row.amount.abs();
            }
            row.amount_group_currency = to_group_currency(row.amount, row.fx_rate);
        }

        debug!(count, "Intercompany rows applied");
        Ok(())
    }
}

/// Formats a 1-based row number as a document number.
#[must_use]
pub fn document_number(n: usize) -> String {
    format!("TX-{n:06}")
}

fn amount_for_category<R: Rng + ?Sized>(rng: &mut R, category: Category) -> Decimal {
    match category {
        Category::Revenue => Decimal::from(rng.random_range(500_i64..5_000)),
        Category::Cogs | Category::Opex => -Decimal::from(rng.random_range(100_i64..3_000)),
    }
}

fn random_user<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("User_{}", rng.random_range(1..=USER_COUNT))
}

fn pick<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &'static str,
    items: &'a [T],
) -> Result<&'a T, GeneratorError> {
    items.choose(rng).ok_or(GeneratorError::EmptyCatalog(catalog))
}

fn pick_weighted<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &'static str,
    items: &'a [(T, u32)],
) -> Result<&'a T, GeneratorError> {
    items
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(item, _)| item)
        .map_err(|_| GeneratorError::EmptyCatalog(catalog))
}
