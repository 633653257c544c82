//! Core logic for Ledgerstar.
//!
//! This crate contains pure logic with ZERO file-system dependencies.
//! Tables come in through the `etl::TableSource` seam and leave through
//! `etl::ModelSink`; everything in between is in-memory.
//!
//! # Modules
//!
//! - `currency` - Group-currency conversion and rounding
//! - `generator` - Seeded synthetic ledger and audit-journal generation
//! - `etl` - Extract, normalize, dimension, fact and KPI building

pub mod currency;
pub mod etl;
pub mod generator;
