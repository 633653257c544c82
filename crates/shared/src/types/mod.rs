//! Common types used across the workspace.

pub mod table;
pub mod value;

pub use table::{Row, Table, TableError};
pub use value::Value;
