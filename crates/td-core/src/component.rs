//! Physical component vocabulary.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Physical flow-system element. The vocabulary is closed: anything else
/// mentioned by a user or a text-generation service is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Component {
    /// Drives flow and maintains pressure
    Pump,
    /// Removes impurities
    Filter,
    /// Storage volume
    Tank,
    /// Regulates or isolates flow
    Valve,
    /// Conveys fluid between components
    Pipe,
}

impl Component {
    /// Vocabulary order. Keyword extraction iterates in this order.
    pub const ALL: [Component; 5] = [
        Component::Pump,
        Component::Filter,
        Component::Tank,
        Component::Valve,
        Component::Pipe,
    ];

    /// Canonical capitalized name, as it appears in the JSON contract.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Pump => "Pump",
            Component::Filter => "Filter",
            Component::Tank => "Tank",
            Component::Valve => "Valve",
            Component::Pipe => "Pipe",
        }
    }

    /// Lowercase substring that triggers keyword extraction.
    ///
    /// Returns `None` for components that are only accepted from a
    /// text-generation service (e.g., `Pipe`, which shows up in nearly every
    /// description and would otherwise pollute every chain).
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Component::Pump => Some("pump"),
            Component::Filter => Some("filter"),
            Component::Tank => Some("tank"),
            Component::Valve => Some("valve"),
            Component::Pipe => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name that is not part of the component vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component: {0:?}")]
pub struct UnknownComponent(pub String);

impl std::str::FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PUMP" => Ok(Component::Pump),
            "FILTER" => Ok(Component::Filter),
            "TANK" => Ok(Component::Tank),
            "VALVE" => Ok(Component::Valve),
            "PIPE" => Ok(Component::Pipe),
            _ => Err(UnknownComponent(s.to_string())),
        }
    }
}

impl TryFrom<String> for Component {
    type Error = UnknownComponent;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Component> for &'static str {
    fn from(component: Component) -> Self {
        component.name()
    }
}
