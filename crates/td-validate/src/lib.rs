//! td-validate: structural warnings for a `Design`.
//!
//! Validation is total and pure: it never fails and never mutates the
//! design. Warnings are emitted in rule order:
//! 1. fewer than two components
//! 2. no flow connections
//! 3. components outside every connection (only when some connection exists)
//! 4. directed loops among the connections

pub mod report;
pub mod rules;

pub use report::{ValidationReport, ValidationWarning};
pub use rules::validate;
