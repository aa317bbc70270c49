//! Validation warnings and the report that collects them.

use core::fmt;
use serde::Serialize;
use td_core::Component;

/// One structural concern about a design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Fewer than two components.
    TooFewComponents,
    /// No connection at all.
    NoConnections,
    /// A component that takes part in no connection.
    Unconnected(Component),
    /// Components that flow back into each other, in design order.
    FlowLoop(Vec<Component>),
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::TooFewComponents => {
                write!(f, "System should contain at least two components.")
            }
            ValidationWarning::NoConnections => {
                write!(f, "No flow connections detected between components.")
            }
            ValidationWarning::Unconnected(component) => {
                write!(f, "Component '{}' is not connected to the flow.", component)
            }
            ValidationWarning::FlowLoop(members) => {
                let names: Vec<&str> = members.iter().map(|c| c.name()).collect();
                write!(f, "Flow connections form a loop through {}.", names.join(", "))
            }
        }
    }
}

/// Ordered warnings computed from one design.
///
/// Serializes as a JSON array of warning messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "Vec<String>")]
pub struct ValidationReport {
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Human-readable messages, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// True when the design raised no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl From<ValidationReport> for Vec<String> {
    fn from(report: ValidationReport) -> Self {
        report.messages()
    }
}
