//! Validation rules.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use td_core::{Component, Design};

use crate::report::{ValidationReport, ValidationWarning};

/// Compute structural warnings for `design`.
pub fn validate(design: &Design) -> ValidationReport {
    let mut report = ValidationReport::default();

    if design.components().len() < 2 {
        report.push(ValidationWarning::TooFewComponents);
    }

    if design.connections().is_empty() {
        report.push(ValidationWarning::NoConnections);
    } else {
        // With no connections at all the rule above already says everything.
        for component in design.unconnected() {
            report.push(ValidationWarning::Unconnected(component));
        }
    }

    for members in flow_loops(design) {
        report.push(ValidationWarning::FlowLoop(members));
    }

    report
}

/// Strongly connected groups of two or more components, each listed in
/// design order. Self-loops cannot occur in a `Design`.
fn flow_loops(design: &Design) -> Vec<Vec<Component>> {
    let mut graph = DiGraph::<Component, ()>::with_capacity(
        design.components().len(),
        design.connections().len(),
    );
    let nodes: Vec<(Component, NodeIndex)> = design
        .components()
        .iter()
        .map(|&c| (c, graph.add_node(c)))
        .collect();
    let index_of = |component: Component| {
        nodes
            .iter()
            .find(|(c, _)| *c == component)
            .map(|&(_, idx)| idx)
    };

    for conn in design.connections() {
        // Endpoints are always present in a constructed Design.
        if let (Some(from), Some(to)) = (index_of(conn.from), index_of(conn.to)) {
            graph.add_edge(from, to, ());
        }
    }

    let mut loops: Vec<Vec<Component>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|mut scc| {
            scc.sort();
            scc.into_iter().map(|idx| graph[idx]).collect()
        })
        .collect();
    loops.sort_by_key(|members| {
        design
            .components()
            .iter()
            .position(|c| *c == members[0])
    });
    loops
}
