//! Domain types and DTOs
//!
//! Records the quote engine consumes and the value objects it returns.

pub mod access;
pub mod inventory;
pub mod job;
pub mod lenient;
pub mod quote;
pub mod rate_table;

// Re-export commonly used types
pub use access::*;
pub use inventory::*;
pub use job::*;
pub use quote::*;
pub use rate_table::*;
