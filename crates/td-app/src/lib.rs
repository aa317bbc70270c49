//! Shared application service layer for text-to-design.
//!
//! Wires configuration, strategy selection, extraction, validation,
//! explanations and flow rendering into one request/response pipeline used
//! by the CLI.

pub mod config;
pub mod design_service;
pub mod error;
pub mod explain;
pub mod http_service;
pub mod render;

// Re-export key types for convenience
pub use config::{AppConfig, ServiceConfig, load_config, parse_config};
pub use design_service::{DesignOutcome, build_extractor, check_design_file, generate_design};
pub use error::{AppError, AppResult};
pub use explain::explain;
pub use http_service::HttpTextService;
pub use render::render_flow;
