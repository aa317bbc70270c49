//! td-core: shared data contract for text-to-design.
//!
//! Contains:
//! - component (closed vocabulary of physical components)
//! - design (components + directed flow connections, invariant-checked)
//! - error (design construction errors)
//!
//! # Example
//!
//! ```
//! use td_core::{Component, Design};
//!
//! let design = Design::chain(vec![Component::Pump, Component::Filter, Component::Tank]).unwrap();
//! assert_eq!(design.components().len(), 3);
//! assert_eq!(design.connections().len(), 2);
//! ```

pub mod component;
pub mod design;
pub mod error;

// Re-exports: nice ergonomics for downstream crates
pub use component::{Component, UnknownComponent};
pub use design::{Connection, Design};
pub use error::{DesignError, DesignResult};
