//! Structured design record: components and directed flow connections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::error::{DesignError, DesignResult};

/// A directed flow edge from `from` to `to`.
///
/// Serialized as a two-element array: `["Pump", "Filter"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Component, Component)", into = "(Component, Component)")]
pub struct Connection {
    pub from: Component,
    pub to: Component,
}

impl Connection {
    pub fn new(from: Component, to: Component) -> Self {
        Self { from, to }
    }

    /// Whether `component` is either endpoint of this edge.
    pub fn touches(&self, component: Component) -> bool {
        self.from == component || self.to == component
    }
}

impl From<(Component, Component)> for Connection {
    fn from((from, to): (Component, Component)) -> Self {
        Self { from, to }
    }
}

impl From<Connection> for (Component, Component) {
    fn from(conn: Connection) -> Self {
        (conn.from, conn.to)
    }
}

/// Components plus directed flow connections extracted from one description.
///
/// A `Design` can only be built through [`Design::new`] or the chain helpers,
/// so every value satisfies:
/// - each component appears at most once;
/// - every connection endpoint is one of `components`;
/// - no connection links a component to itself;
/// - no connection is repeated.
///
/// It is immutable once built. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DesignRecord")]
pub struct Design {
    components: Vec<Component>,
    connections: Vec<Connection>,
}

/// Wire shape of a design; exactly these two fields.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DesignRecord {
    components: Vec<Component>,
    connections: Vec<Connection>,
}

impl TryFrom<DesignRecord> for Design {
    type Error = DesignError;

    fn try_from(record: DesignRecord) -> Result<Self, Self::Error> {
        Design::new(record.components, record.connections)
    }
}

impl Design {
    /// Build a design, checking the structural invariants.
    pub fn new(components: Vec<Component>, connections: Vec<Connection>) -> DesignResult<Self> {
        let mut seen = HashSet::with_capacity(components.len());
        for &component in &components {
            if !seen.insert(component) {
                return Err(DesignError::DuplicateComponent { component });
            }
        }

        let mut edges = HashSet::with_capacity(connections.len());
        for (index, conn) in connections.iter().enumerate() {
            for endpoint in [conn.from, conn.to] {
                if !seen.contains(&endpoint) {
                    return Err(DesignError::DanglingConnection {
                        index,
                        component: endpoint,
                    });
                }
            }
            if conn.from == conn.to {
                return Err(DesignError::SelfLoop {
                    index,
                    component: conn.from,
                });
            }
            if !edges.insert(*conn) {
                return Err(DesignError::DuplicateConnection {
                    index,
                    from: conn.from,
                    to: conn.to,
                });
            }
        }

        Ok(Self {
            components,
            connections,
        })
    }

    /// A design with no components and no connections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a strict linear pipeline: each component flows into the next.
    pub fn chain(components: Vec<Component>) -> DesignResult<Self> {
        let connections = components
            .windows(2)
            .map(|pair| Connection::new(pair[0], pair[1]))
            .collect();
        Self::new(components, connections)
    }

    /// Like [`Design::chain`], but drops repeated components (keeping the
    /// first occurrence) instead of rejecting them. Links between distinct
    /// neighbours satisfy every invariant, so this cannot fail.
    pub fn chain_distinct(components: impl IntoIterator<Item = Component>) -> Self {
        let mut distinct: Vec<Component> = Vec::new();
        for component in components {
            if !distinct.contains(&component) {
                distinct.push(component);
            }
        }
        let connections = distinct
            .windows(2)
            .map(|pair| Connection::new(pair[0], pair[1]))
            .collect();
        Self {
            components: distinct,
            connections,
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, component: Component) -> bool {
        self.components.contains(&component)
    }

    /// True when the connections are exactly the consecutive pairs of
    /// `components`, i.e. the design reads left to right as one chain.
    pub fn is_linear_chain(&self) -> bool {
        self.connections.len() + 1 == self.components.len()
            && self
                .components
                .windows(2)
                .zip(&self.connections)
                .all(|(pair, conn)| conn.from == pair[0] && conn.to == pair[1])
    }

    /// Components that are not an endpoint of any connection, in design order.
    pub fn unconnected(&self) -> Vec<Component> {
        self.components
            .iter()
            .copied()
            .filter(|&c| !self.connections.iter().any(|conn| conn.touches(c)))
            .collect()
    }

    /// Consume the design, returning its parts.
    pub fn into_parts(self) -> (Vec<Component>, Vec<Connection>) {
        (self.components, self.connections)
    }
}
