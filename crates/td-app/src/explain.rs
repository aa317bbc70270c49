//! Canned per-component explanations.

use td_core::{Component, Design};

const BASIC_SYSTEM: &str = "Basic system detected. Add more components for better functionality.";

fn sentence(component: Component) -> &'static str {
    match component {
        Component::Pump => "Pump initiates flow and maintains required pressure.",
        Component::Filter => "Filter removes impurities to protect downstream components.",
        Component::Tank => "Tank provides storage and balances demand fluctuations.",
        Component::Valve => "Valve regulates or isolates flow between sections.",
        Component::Pipe => "Pipe conveys fluid between connected components.",
    }
}

/// One sentence per component present, in vocabulary order.
pub fn explain(design: &Design) -> Vec<String> {
    let lines: Vec<String> = Component::ALL
        .iter()
        .filter(|&&c| design.contains(c))
        .map(|&c| sentence(c).to_string())
        .collect();

    if lines.is_empty() {
        vec![BASIC_SYSTEM.to_string()]
    } else {
        lines
    }
}
