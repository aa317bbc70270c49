//! Strategy selection.

use serde::{Deserialize, Serialize};
use td_core::Design;

use crate::delegated::DelegatedExtractor;
use crate::error::ExtractResult;
use crate::keyword::KeywordExtractor;

/// Which extraction strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Keyword,
    Delegated,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Keyword => "keyword",
            Strategy::Delegated => "delegated",
        }
    }
}

/// One extractor, polymorphic over the two strategies.
#[derive(Debug, Clone)]
pub enum Extractor {
    Keyword(KeywordExtractor),
    Delegated(DelegatedExtractor),
}

impl Extractor {
    pub fn strategy(&self) -> Strategy {
        match self {
            Extractor::Keyword(_) => Strategy::Keyword,
            Extractor::Delegated(_) => Strategy::Delegated,
        }
    }

    /// Map `text` to a design. The keyword arm never fails.
    pub async fn extract(&self, text: &str) -> ExtractResult<Design> {
        match self {
            Extractor::Keyword(extractor) => Ok(extractor.extract(text)),
            Extractor::Delegated(extractor) => extractor.extract(text).await,
        }
    }
}

impl From<KeywordExtractor> for Extractor {
    fn from(extractor: KeywordExtractor) -> Self {
        Extractor::Keyword(extractor)
    }
}

impl From<DelegatedExtractor> for Extractor {
    fn from(extractor: DelegatedExtractor) -> Self {
        Extractor::Delegated(extractor)
    }
}
