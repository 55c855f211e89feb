//! Parsing helpers shared by the row normalizer and the aggregator.

pub mod date;

pub use date::{DateParts, is_ambiguous, parse_day_month_year, resolve, try_resolve};
