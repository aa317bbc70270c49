//! Delegated strategy: ask a text-generation service for the design JSON.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use td_core::Design;
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::payload::parse_design_payload;
use crate::service::{TextGenerationService, build_prompt};

/// Deadline and retry policy for service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegatedConfig {
    /// Deadline for one service call. The call is cancelled when it elapses.
    pub timeout: Duration,
    /// Total attempts, counting the first. Only retryable `ServiceUnavailable` errors are retried.
    pub max_attempts: usize,
}

impl Default for DelegatedConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 2,
        }
    }
}

/// Single attempt: prompt the service under `timeout`, then validate the reply.
pub async fn extract_via_service(
    text: &str,
    service: &dyn TextGenerationService,
    timeout: Duration,
) -> ExtractResult<Design> {
    let prompt = build_prompt(text);
    let raw = call_with_deadline(service, &prompt, timeout).await?;
    debug!(
        service = service.name(),
        reply_len = raw.len(),
        "service replied"
    );
    parse_design_payload(&raw)
}

async fn call_with_deadline(
    service: &dyn TextGenerationService,
    prompt: &str,
    deadline: Duration,
) -> ExtractResult<String> {
    // Dropping the inner future on elapse cancels the in-flight request.
    match tokio::time::timeout(deadline, service.generate(prompt)).await {
        Ok(Ok(raw)) => Ok(raw),
        Ok(Err(err)) => Err(err.into()),
        Err(_) => Err(ExtractError::ServiceUnavailable {
            reason: format!(
                "{} did not answer within {} ms",
                service.name(),
                deadline.as_millis()
            ),
            retryable: true,
        }),
    }
}

/// Extractor backed by a `TextGenerationService`.
#[derive(Clone)]
pub struct DelegatedExtractor {
    service: Arc<dyn TextGenerationService>,
    config: DelegatedConfig,
}

impl DelegatedExtractor {
    pub fn new(service: Arc<dyn TextGenerationService>, config: DelegatedConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> DelegatedConfig {
        self.config
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Extract with retries on transient service failures.
    ///
    /// Malformed or invalid replies are returned as-is; no best-guess design
    /// is ever substituted.
    pub async fn extract(&self, text: &str) -> ExtractResult<Design> {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match extract_via_service(text, self.service.as_ref(), self.config.timeout).await {
                Err(err) if err.is_transient() && attempt < attempts => {
                    warn!(
                        service = self.service.name(),
                        attempt,
                        attempts,
                        error = %err,
                        "service attempt failed, retrying"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl fmt::Debug for DelegatedExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedExtractor")
            .field("service", &self.service.name())
            .field("config", &self.config)
            .finish()
    }
}
