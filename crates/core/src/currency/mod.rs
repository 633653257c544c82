//! Group-currency handling.

pub mod conversion;

#[cfg(test)]
mod props;

pub use conversion::{FX_RATE_DECIMALS, GROUP_AMOUNT_DECIMALS, convert_amount, to_group_currency};
