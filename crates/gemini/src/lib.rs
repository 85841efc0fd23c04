//! Gemini integration for room analysis.
//!
//! Builds the multimodal `generateContent` request, calls the REST API, and
//! feeds the reply through the core normalizer. [`analyzer::RoomAnalyzer`]
//! is the entry point used by the HTTP layer.

pub mod analyzer;
pub mod api;
pub mod request;
pub mod response;
