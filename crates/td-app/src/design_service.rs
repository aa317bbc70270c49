//! Text-to-design pipeline: extract, validate, explain.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use td_core::Design;
use td_extract::{DelegatedExtractor, Extractor, KeywordExtractor, Strategy};
use td_validate::{ValidationReport, validate};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::explain::explain;
use crate::http_service::HttpTextService;

/// Everything produced for one description.
#[derive(Debug, Clone, Serialize)]
pub struct DesignOutcome {
    pub request_id: Uuid,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub strategy: Strategy,
    pub design: Design,
    pub warnings: ValidationReport,
    pub explanations: Vec<String>,
}

/// Build the extractor selected by `config`.
///
/// The ordering policy only applies to the keyword strategy; a service
/// decides its own component order.
pub fn build_extractor(config: &AppConfig) -> AppResult<Extractor> {
    match config.strategy {
        Strategy::Keyword => Ok(KeywordExtractor::new(config.order).into()),
        Strategy::Delegated => {
            let service = HttpTextService::from_config(&config.service)?;
            info!(
                endpoint = %config.service.endpoint,
                model = %service.model(),
                timeout_s = config.service.timeout_s,
                "using delegated extraction"
            );
            Ok(DelegatedExtractor::new(Arc::new(service), config.service.delegated_config()).into())
        }
    }
}

/// Run one description through extraction, validation and explanation.
///
/// Blank input is rejected before any extraction happens. Extraction
/// failures are returned to the caller; no fallback design is substituted.
pub async fn generate_design(extractor: &Extractor, text: &str) -> AppResult<DesignOutcome> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a system description.".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    let strategy = extractor.strategy();
    let span = info_span!("generate_design", %request_id, strategy = strategy.label());

    async move {
        let design = extractor.extract(text).await?;
        let warnings = validate(&design);
        let explanations = explain(&design);

        info!(
            components = design.components().len(),
            connections = design.connections().len(),
            warnings = warnings.len(),
            "design generated"
        );

        Ok::<_, AppError>(DesignOutcome {
            request_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            strategy,
            design,
            warnings,
            explanations,
        })
    }
    .instrument(span)
    .await
}

/// Load a design JSON file through the strict contract and validate it.
pub fn check_design_file(path: &Path) -> AppResult<(Design, ValidationReport)> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::DesignFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let design: Design =
        serde_json::from_str(&content).map_err(|e| AppError::DesignFile(e.to_string()))?;
    let report = validate(&design);
    Ok((design, report))
}
