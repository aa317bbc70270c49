//! Keyword strategy: case-insensitive vocabulary matching.

use serde::{Deserialize, Serialize};
use td_core::{Component, Design};
use tracing::debug;

/// Order in which matched components are listed (and therefore chained).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentOrder {
    /// Fixed vocabulary order, regardless of where terms appear.
    /// "tank, then pump" still yields Pump -> Tank.
    #[default]
    Vocabulary,
    /// Order of first occurrence in the input text.
    FirstMention,
}

/// Deterministic extractor. Total over all inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordExtractor {
    order: ComponentOrder,
}

impl KeywordExtractor {
    pub fn new(order: ComponentOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ComponentOrder {
        self.order
    }

    /// Match vocabulary keywords in `text` and chain the matches linearly.
    ///
    /// No match yields an empty design; that is a valid output, not a failure.
    pub fn extract(&self, text: &str) -> Design {
        let lowered = text.to_lowercase();

        // (first byte offset, component) for every keyword present
        let mut found: Vec<(usize, Component)> = Component::ALL
            .iter()
            .filter_map(|&c| {
                let keyword = c.keyword()?;
                lowered.find(keyword).map(|pos| (pos, c))
            })
            .collect();

        if self.order == ComponentOrder::FirstMention {
            found.sort_by_key(|&(pos, _)| pos);
        }

        debug!(
            order = ?self.order,
            matched = found.len(),
            "keyword extraction"
        );

        Design::chain_distinct(found.into_iter().map(|(_, c)| c))
    }
}

/// Extract with the default (vocabulary-order) policy.
pub fn extract(text: &str) -> Design {
    KeywordExtractor::default().extract(text)
}
