//! External text-generation collaborator.

use async_trait::async_trait;
use td_core::Component;

use crate::error::ServiceError;

/// Free-text completion given a prompt.
///
/// Replies are untrusted: they may wrap the requested JSON in prose or
/// markdown fencing, or not contain it at all.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Send `prompt` and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Prompt asking the service for exactly the design JSON contract.
pub fn build_prompt(text: &str) -> String {
    let vocabulary = Component::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You convert plain-English descriptions of physical flow systems into a structured design.

ALLOWED COMPONENTS (use these exact names, nothing else): {vocabulary}

RESPONSE FORMAT - respond ONLY with a JSON object of exactly this shape:
{{"components": ["Pump", "Filter"], "connections": [["Pump", "Filter"]]}}

RULES:
- "components" lists each component at most once, in flow order.
- "connections" lists directed flow edges as [from, to] pairs.
- Every name used in "connections" must also appear in "components".
- No other fields. No markdown, no explanatory text outside the JSON.

DESCRIPTION:
{text}"#
    )
}
