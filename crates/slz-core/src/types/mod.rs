//! Common types used across slz-* crates

pub mod common;
pub mod market;
pub mod symbol;

pub use common::{Periodicity, StatementKind};
pub use market::{parse_raw_number, PricePoint, RawPeriod, RawQuote};
pub use symbol::Symbol;
