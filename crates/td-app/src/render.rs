//! Plain-text left-to-right flow rendering.

use td_core::Design;

const ARROW: &str = " --> ";

/// Render a design as text.
///
/// A linear chain renders on one line: `[Pump] --> [Filter] --> [Tank]`.
/// Anything else renders one line per connection, then one line per
/// component that takes part in no connection.
pub fn render_flow(design: &Design) -> String {
    if design.is_empty() {
        return "No components available to visualize.".to_string();
    }

    if design.is_linear_chain() {
        return design
            .components()
            .iter()
            .map(|c| format!("[{}]", c))
            .collect::<Vec<_>>()
            .join(ARROW);
    }

    let mut lines: Vec<String> = design
        .connections()
        .iter()
        .map(|conn| format!("[{}]{}[{}]", conn.from, ARROW, conn.to))
        .collect();
    lines.extend(design.unconnected().into_iter().map(|c| format!("[{}]", c)));
    lines.join("\n")
}
