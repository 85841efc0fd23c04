//! `generateContent` reply envelope and text extraction.
//!
//! Only the fields the analysis pipeline reads are modelled; everything
//! else in the envelope (safety ratings, usage metadata, ...) is ignored.

use serde::{Deserialize, Deserializer};

use roomfit_core::error::AnalysisError;

/// Finish reason reported when the output-token ceiling cut the reply short.
pub const FINISH_REASON_MAX_TOKENS: &str = "MAX_TOKENS";

/// Top-level reply body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<Candidate>,
}

/// One generated alternative.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parts: Vec<CandidatePart>,
}

/// A reply part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Reads an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Candidate {
    /// Concatenated text of every text part, or `None` if there is none.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Whether generation stopped at the output-token ceiling.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some(FINISH_REASON_MAX_TOKENS)
    }
}

impl GenerateContentResponse {
    /// The first candidate, or [`AnalysisError::EmptyCandidate`].
    pub fn first_candidate(&self) -> Result<&Candidate, AnalysisError> {
        self.candidates.first().ok_or(AnalysisError::EmptyCandidate)
    }

    /// Text of the first candidate.
    ///
    /// Distinguishes a reply with no candidates
    /// ([`AnalysisError::EmptyCandidate`]) from a candidate without text
    /// ([`AnalysisError::EmptyContent`]).
    pub fn text(&self) -> Result<String, AnalysisError> {
        self.first_candidate()?
            .text()
            .ok_or(AnalysisError::EmptyContent)
    }
}
