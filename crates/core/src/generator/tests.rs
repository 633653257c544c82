//! Property-based tests for dataset generation.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use super::service::{DatasetGenerator, GeneratedDataset, GeneratorParams};
use super::types::{AuditAction, Category, TransactionStatus};
use crate::currency::to_group_currency;

fn generate(seed: u64, rows: usize) -> GeneratedDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let params = GeneratorParams {
        rows,
        ..GeneratorParams::default()
    };
    DatasetGenerator::generate(&mut rng, &params).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Group amounts are always the converted amount rounded to cents.
    #[test]
    fn test_group_amount_matches_conversion(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        for tx in &data.financial {
            prop_assert_eq!(tx.amount_group_currency, to_group_currency(tx.amount, tx.fx_rate));
            prop_assert!(tx.amount_group_currency.scale() <= 2);
        }
    }

    /// Document numbers are unique and sequential.
    #[test]
    fn test_document_numbers_unique(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        let unique: HashSet<&str> = data.financial.iter().map(|t| t.document_no.as_str()).collect();
        prop_assert_eq!(unique.len(), rows);
        prop_assert_eq!(data.financial[rows - 1].document_no.clone(), format!("TX-{rows:06}"));
    }

    /// Intercompany rows name a different subsidiary; other rows name none.
    #[test]
    fn test_intercompany_targets(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        for tx in &data.financial {
            if tx.is_intercompany() {
                prop_assert!(!tx.intercompany_to.is_empty());
                prop_assert_ne!(&tx.intercompany_to, &tx.subsidiary);
                prop_assert_eq!(&tx.counterparty_id, &tx.intercompany_to);
                if tx.category != Category::Revenue {
                    prop_assert!(tx.amount <= Decimal::ZERO);
                }
            } else {
                prop_assert!(tx.intercompany_to.is_empty());
            }
        }
    }

    /// Amount signs follow the category outside intercompany rows too.
    #[test]
    fn test_amount_sign_by_category(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        for tx in &data.financial {
            match tx.category {
                Category::Revenue => prop_assert!(tx.amount > Decimal::ZERO),
                Category::Cogs | Category::Opex => prop_assert!(tx.amount < Decimal::ZERO),
            }
            prop_assert!(tx.days_overdue >= 0);
            prop_assert!(tx.due_date >= tx.posting_date);
        }
    }

    /// Audit ids run 1..=n and every entry references a known document.
    #[test]
    fn test_audit_ids_sequential(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        let documents: HashSet<&str> = data.financial.iter().map(|t| t.document_no.as_str()).collect();
        for (i, entry) in data.audit.iter().enumerate() {
            prop_assert_eq!(entry.audit_id, i as u64 + 1);
            prop_assert!(documents.contains(entry.document_no.as_str()));
        }
    }

    /// Each transaction gets a creation entry plus the entries its flags imply.
    #[test]
    fn test_audit_lifecycle(seed in any::<u64>(), rows in 1usize..300) {
        let data = generate(seed, rows);
        let mut by_document: HashMap<&str, Vec<AuditAction>> = HashMap::new();
        for entry in &data.audit {
            by_document.entry(entry.document_no.as_str()).or_default().push(entry.action_type);
        }

        for tx in &data.financial {
            let actions = &by_document[tx.document_no.as_str()];
            prop_assert!((1..=3).contains(&actions.len()));
            prop_assert_eq!(actions[0], AuditAction::Created);

            let approved = actions.contains(&AuditAction::ApprovedPosted);
            prop_assert_eq!(approved, tx.approved == 1);

            let adjusted = actions.contains(&AuditAction::AdjustedReversed);
            prop_assert_eq!(
                adjusted,
                tx.cost_adjustment_flag == 1 || tx.status == TransactionStatus::Reversed
            );
        }
    }

    /// Equal seeds give equal datasets.
    #[test]
    fn test_same_seed_is_deterministic(seed in any::<u64>(), rows in 1usize..100) {
        prop_assert_eq!(generate(seed, rows), generate(seed, rows));
    }
}
