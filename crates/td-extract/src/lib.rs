//! td-extract: free text to structured `Design`.
//!
//! Two interchangeable strategies converge on the same output contract:
//! - `keyword`: deterministic, total keyword matching
//! - `delegated`: an external text-generation service asked for JSON,
//!   whose reply is treated as untrusted and validated in `payload`
//!
//! `Extractor` selects one of them by configuration.

pub mod delegated;
pub mod error;
pub mod extractor;
pub mod keyword;
pub mod payload;
pub mod service;

pub use delegated::{DelegatedConfig, DelegatedExtractor, extract_via_service};
pub use error::{ExtractError, ExtractResult, ServiceError};
pub use extractor::{Extractor, Strategy};
pub use keyword::{ComponentOrder, KeywordExtractor, extract};
pub use payload::{locate_json, parse_design_payload};
pub use service::{TextGenerationService, build_prompt};
