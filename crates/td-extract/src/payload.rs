//! Validation of untrusted service replies.
//!
//! A reply is accepted only after:
//! 1. a JSON object is located inside it (prose and ``` fencing tolerated);
//! 2. the object matches the design schema exactly;
//! 3. names outside the vocabulary are stripped;
//! 4. the remaining structure passes `Design::new`.

use serde::Deserialize;
use serde_json::Value;
use td_core::{Component, Connection, Design};
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};

/// Exactly the two fields of the contract, with names still unchecked.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DesignPayload {
    components: Vec<String>,
    connections: Vec<(String, String)>,
}

/// Find the JSON object inside a raw reply.
///
/// Looks inside the first ```json (or bare ```) fenced block when one
/// exists, then falls back to the whole reply. Returns the first complete
/// top-level object, so braces in surrounding prose are skipped.
pub fn locate_json(raw: &str) -> Option<&str> {
    candidates(raw).into_iter().next()
}

/// Complete objects from the fenced block (if any), then from the whole reply.
fn candidates(raw: &str) -> Vec<&str> {
    let text = raw.trim();
    let mut found = fenced_block(text).map(json_objects).unwrap_or_default();
    found.extend(json_objects(text));
    found
}

fn fenced_block(text: &str) -> Option<&str> {
    if text.contains("```json") {
        text.split("```json").nth(1).and_then(|s| s.split("```").next())
    } else if text.contains("```") {
        text.split("```").nth(1)
    } else {
        None
    }
}

/// Every complete top-level JSON object in `text`, in order.
///
/// Each `{` is tried as a start; a stray brace that does not open valid JSON
/// is skipped. Objects nested inside an accepted one are not reported.
fn json_objects(text: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut resume = 0;
    for (start, _) in text.match_indices('{') {
        if start < resume {
            continue;
        }
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Object(_))) = stream.next() {
            let end = start + stream.byte_offset();
            objects.push(&text[start..end]);
            resume = end;
        }
    }
    objects
}

/// Turn a raw service reply into a validated `Design`.
///
/// The first located object that matches the schema is used. Fails with
/// `MalformedResponse` when none does (reporting why the first object was
/// rejected), and with `InvalidDesign` when the stripped structure breaks a
/// design invariant (e.g. a connection naming a component that is not
/// listed in `components`).
pub fn parse_design_payload(raw: &str) -> ExtractResult<Design> {
    let mut first_error = None;
    let mut payload = None;
    for candidate in candidates(raw) {
        match serde_json::from_str::<DesignPayload>(candidate) {
            Ok(parsed) => {
                payload = Some(parsed);
                break;
            }
            Err(e) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }

    let payload = match (payload, first_error) {
        (Some(payload), _) => payload,
        (None, Some(reason)) => return Err(ExtractError::malformed(reason)),
        (None, None) => {
            return Err(ExtractError::malformed(
                "no JSON object found in service response",
            ));
        }
    };

    let mut components = Vec::with_capacity(payload.components.len());
    for name in &payload.components {
        match name.parse::<Component>() {
            Ok(component) if components.contains(&component) => {
                debug!(%component, "collapsing repeated component");
            }
            Ok(component) => components.push(component),
            Err(_) => warn!(token = %name, "dropping component outside the vocabulary"),
        }
    }

    let mut connections = Vec::with_capacity(payload.connections.len());
    for (from, to) in &payload.connections {
        match (from.parse::<Component>(), to.parse::<Component>()) {
            (Ok(from), Ok(to)) => connections.push(Connection::new(from, to)),
            _ => warn!(
                from = %from,
                to = %to,
                "dropping connection with an endpoint outside the vocabulary"
            ),
        }
    }

    Ok(Design::new(components, connections)?)
}
