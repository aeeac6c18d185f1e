//! Quote composition engine
//!
//! Pure, synchronous calculators. Inputs are already-loaded records and a
//! rate table snapshot; output is a [`QuoteResult`](crate::domain::QuoteResult).
//! No I/O happens here.

pub mod access_fees;
pub mod aggregate;
pub mod composer;
pub mod geo;
pub mod labor;
pub mod materials;
pub mod rules;

pub use composer::compute_quote;
