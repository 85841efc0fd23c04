//! Tolerant recovery of a [`RoomAnalysis`] from free-form model text.
//!
//! Language models usually honour a "JSON only" instruction, but replies
//! also arrive wrapped in markdown fences, surrounded by commentary, or cut
//! off at the output-token ceiling. Recovery is an ordered list of named
//! [`Strategy`] values tried first-success-wins:
//!
//! 1. [`Strategy::DirectParse`]: the whole reply is the object.
//! 2. [`Strategy::FencedBlock`]: the inner text of the first ```` ``` ```` block.
//! 3. [`Strategy::BraceSpan`]: first `{` through last `}` of the
//!    fence-stripped text.
//!
//! Every candidate is schema-checked with [`validate_analysis`]; a parsed
//! but incomplete object never wins. When all strategies fail, the most
//! advanced failure is reported (see [`AnalysisError::depth`]).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::analysis::{validate_analysis, RoomAnalysis};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Regex pattern matching a triple-backtick block, optionally tagged `json`.
pub const FENCED_BLOCK_PATTERN: &str = r"```(?i:json)?\s*([\s\S]*?)```";

static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FENCED_BLOCK_PATTERN).expect("valid regex"));

/// Strategies in the order they are attempted.
pub const STRATEGIES: [Strategy; 3] = [
    Strategy::DirectParse,
    Strategy::FencedBlock,
    Strategy::BraceSpan,
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A named way of locating the JSON object inside model text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    DirectParse,
    FencedBlock,
    BraceSpan,
}

impl Strategy {
    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::DirectParse => "direct_parse",
            Strategy::FencedBlock => "fenced_block",
            Strategy::BraceSpan => "brace_span",
        }
    }

    /// Locate this strategy's JSON candidate in `text`, if it has one.
    pub fn candidate(self, text: &str) -> Option<&str> {
        match self {
            Strategy::DirectParse => {
                let trimmed = text.trim();
                trimmed.starts_with('{').then_some(trimmed)
            }
            Strategy::FencedBlock => fenced_block(text),
            Strategy::BraceSpan => brace_span(fenced_block(text).unwrap_or(text)),
        }
    }

    /// Run this strategy: locate, parse, and schema-check its candidate.
    pub fn attempt(self, text: &str) -> Result<RoomAnalysis, AnalysisError> {
        let candidate = self.candidate(text).ok_or(AnalysisError::NoJsonFound)?;
        let value: Value = serde_json::from_str(candidate)
            .map_err(|e| AnalysisError::JsonParse(e.to_string()))?;
        validate_analysis(&value)
    }
}

/// Outcome of a single strategy, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: Strategy,
    pub error: AnalysisError,
}

/// A successfully normalized analysis and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub analysis: RoomAnalysis,
    pub strategy: Strategy,
    /// Failures of the strategies tried before the winning one.
    pub failed: Vec<StrategyFailure>,
}

/// Every strategy failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeFailure {
    /// The most advanced failure across all strategies.
    pub error: AnalysisError,
    /// Per-strategy failures in attempt order.
    pub failed: Vec<StrategyFailure>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize model text into a validated [`RoomAnalysis`].
///
/// Convenience wrapper over [`normalize_detailed`] that drops diagnostics.
pub fn normalize(text: &str) -> Result<RoomAnalysis, AnalysisError> {
    normalize_detailed(text)
        .map(|normalized| normalized.analysis)
        .map_err(|failure| failure.error)
}

/// Try every [`STRATEGIES`] entry in order, returning the first valid record.
pub fn normalize_detailed(text: &str) -> Result<Normalized, NormalizeFailure> {
    let mut failed = Vec::with_capacity(STRATEGIES.len());

    for strategy in STRATEGIES {
        match strategy.attempt(text) {
            Ok(analysis) => {
                return Ok(Normalized {
                    analysis,
                    strategy,
                    failed,
                })
            }
            Err(error) => failed.push(StrategyFailure { strategy, error }),
        }
    }

    // First failure wins ties so the reported error follows attempt order.
    let error = failed
        .iter()
        .map(|f| &f.error)
        .fold(AnalysisError::NoJsonFound, |best, e| {
            if e.depth() > best.depth() {
                e.clone()
            } else {
                best
            }
        });

    Err(NormalizeFailure { error, failed })
}

/// Inner text of the first fenced code block, trimmed.
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// The span from the first `{` to the last `}`, inclusive.
pub fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
