//! Integration tests for the delegated strategy against in-process services.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use td_core::{Component, Connection};
use td_extract::{
    DelegatedConfig, DelegatedExtractor, ExtractError, Extractor, KeywordExtractor, ServiceError,
    Strategy, TextGenerationService, extract_via_service,
};

/// Replays canned replies in order and counts calls.
struct ScriptedService {
    replies: Mutex<VecDeque<Result<String, ServiceError>>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn new(replies: Vec<Result<String, ServiceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationService for ScriptedService {
    async fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceError::EmptyResponse))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Never answers within any reasonable deadline.
struct HangingService;

#[async_trait]
impl TextGenerationService for HangingService {
    async fn generate(&self, _prompt: &str) -> Result<String, ServiceError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }

    fn name(&self) -> &str {
        "hanging"
    }
}

/// Echoes the prompt back, so tests can check what was asked.
struct EchoService;

#[async_trait]
impl TextGenerationService for EchoService {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        Ok(prompt.to_string())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

const WATER: &str = r#"{"components": ["Pump", "Filter", "Tank"], "connections": [["Pump", "Filter"], ["Filter", "Tank"]]}"#;

fn fast_config(max_attempts: usize) -> DelegatedConfig {
    DelegatedConfig {
        timeout: Duration::from_millis(200),
        max_attempts,
    }
}

#[tokio::test]
async fn fenced_reply_is_accepted() {
    let service = ScriptedService::new(vec![Ok(format!(
        "Here you go:\n```json\n{WATER}\n```"
    ))]);
    let design = extract_via_service("water system", &service, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(
        design.components(),
        &[Component::Pump, Component::Filter, Component::Tank]
    );
    assert_eq!(
        design.connections()[1],
        Connection::new(Component::Filter, Component::Tank)
    );
}

#[tokio::test]
async fn hanging_service_times_out() {
    let started = std::time::Instant::now();
    let err = extract_via_service("pump and tank", &HangingService, Duration::from_millis(50))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::ServiceUnavailable { .. }));
    assert!(err.to_string().contains("hanging"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn service_error_is_unavailable() {
    let service = ScriptedService::new(vec![Err(ServiceError::Request {
        message: "connection refused".into(),
    })]);
    let err = extract_via_service("pump", &service, Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::ServiceUnavailable { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn prompt_example_is_a_valid_payload() {
    // Echoing the prompt back hands its example object to the validator.
    let design = extract_via_service("a pump feeding a tank", &EchoService, Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(design.components(), &[Component::Pump, Component::Filter]);
}

#[tokio::test]
async fn retries_transient_failure() {
    let service = Arc::new(ScriptedService::new(vec![
        Err(ServiceError::Status {
            status: 529,
            body: "overloaded".into(),
        }),
        Ok(WATER.to_string()),
    ]));
    let extractor = DelegatedExtractor::new(service.clone(), fast_config(2));
    let design = extractor.extract("water system").await.unwrap();
    assert_eq!(design.components().len(), 3);
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let service = Arc::new(ScriptedService::new(vec![
        Err(ServiceError::EmptyResponse),
        Err(ServiceError::EmptyResponse),
        Ok(WATER.to_string()),
    ]));
    let extractor = DelegatedExtractor::new(service.clone(), fast_config(2));
    let err = extractor.extract("water system").await.unwrap_err();
    assert!(matches!(err, ExtractError::ServiceUnavailable { .. }));
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn malformed_reply_is_not_retried() {
    let service = Arc::new(ScriptedService::new(vec![
        Ok(r#"{"components": ["Pump""#.to_string()),
        Ok(WATER.to_string()),
    ]));
    let extractor = DelegatedExtractor::new(service.clone(), fast_config(3));
    let err = extractor.extract("water system").await.unwrap_err();
    assert!(matches!(err, ExtractError::MalformedResponse { .. }));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn rejected_credentials_are_not_retried() {
    let service = Arc::new(ScriptedService::new(vec![
        Err(ServiceError::Status {
            status: 401,
            body: "invalid x-api-key".into(),
        }),
        Ok(WATER.to_string()),
    ]));
    let extractor = DelegatedExtractor::new(service.clone(), fast_config(3));
    let err = extractor.extract("water system").await.unwrap_err();
    assert!(matches!(
        err,
        ExtractError::ServiceUnavailable {
            retryable: false,
            ..
        }
    ));
    assert!(err.to_string().contains("401"));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn dangling_reply_is_invalid_design() {
    let service = Arc::new(ScriptedService::new(vec![Ok(
        r#"{"components": ["Pump"], "connections": [["Pump", "Valve"]]}"#.to_string(),
    )]));
    let extractor: Extractor = DelegatedExtractor::new(service, fast_config(1)).into();
    assert_eq!(extractor.strategy(), Strategy::Delegated);
    let err = extractor.extract("pump and valve").await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidDesign(_)));
}

#[tokio::test]
async fn both_strategies_agree_on_contract() {
    let keyword: Extractor = KeywordExtractor::default().into();
    let delegated: Extractor = DelegatedExtractor::new(
        Arc::new(ScriptedService::new(vec![Ok(WATER.to_string())])),
        fast_config(1),
    )
    .into();

    let text = "Water system with pump, filter and tank";
    let from_keywords = keyword.extract(text).await.unwrap();
    let from_service = delegated.extract(text).await.unwrap();

    assert_eq!(from_keywords, from_service);
    assert_eq!(
        serde_json::to_string(&from_keywords).unwrap(),
        serde_json::to_string(&from_service).unwrap()
    );
}
