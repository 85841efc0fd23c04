//! Outbound `generateContent` request construction.
//!
//! The prompt and sampling parameters are fixed; the only caller input is
//! the base64 image payload.

use serde::Serialize;

use roomfit_core::error::AnalysisError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Instruction sent alongside the image.
pub const ANALYSIS_PROMPT: &str = r#"Analyze this room image and provide:
1. A brief room description (2-3 sentences)
2. Detected interior style (e.g., modern, minimalist, scandinavian, industrial, etc.)
3. Color palette (list 3-4 main colors)
4. Recommended furniture categories needed (list: seating, dining, storage, lighting, accessories)

Format your response as JSON with these exact keys:
{
  "description": "...",
  "style": "...",
  "colors": ["color1", "color2", "color3"],
  "categories": ["category1", "category2", "category3"]
}

IMPORTANT: Return ONLY the JSON object, no markdown formatting, no code blocks, no additional text."#;

/// Output-token ceiling. Large enough that a multi-sentence description plus
/// both arrays is never truncated.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Low temperature for consistent, format-following replies.
pub const TEMPERATURE: f32 = 0.4;

/// Nucleus sampling bound.
pub const TOP_P: f32 = 0.8;

/// Top-k sampling bound.
pub const TOP_K: u32 = 40;

/// MIME type used when the payload carries no data-URL prefix.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Marker separating a data-URL header from its payload.
const BASE64_MARKER: &str = "base64,";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `POST models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A text or inline-binary piece of a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// A base64 image payload with any data-URL header removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePayload<'a> {
    /// MIME type from a `data:<mime>;base64,` header, if there was one.
    pub mime_type: Option<&'a str>,
    /// Raw base64 bytes.
    pub data: &'a str,
}

/// Split an optional data-URL header off a base64 image string.
///
/// Everything up to and including the first `base64,` is dropped. A MIME
/// type is reported only for well-formed `data:image/...;base64,` headers.
pub fn strip_data_url(image_base64: &str) -> ImagePayload<'_> {
    let trimmed = image_base64.trim();
    let Some(idx) = trimmed.find(BASE64_MARKER) else {
        return ImagePayload {
            mime_type: None,
            data: trimmed,
        };
    };

    let header = &trimmed[..idx];
    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.strip_suffix(';'))
        .filter(|mime| mime.starts_with("image/"));

    ImagePayload {
        mime_type,
        data: trimmed[idx + BASE64_MARKER.len()..].trim(),
    }
}

/// Build the room analysis request for a base64 image.
///
/// Fails with [`AnalysisError::MissingInput`] when nothing remains after the
/// data-URL header is stripped.
pub fn build_analysis_request(image_base64: &str) -> Result<GenerateContentRequest, AnalysisError> {
    let payload = strip_data_url(image_base64);
    if payload.data.is_empty() {
        return Err(AnalysisError::MissingInput);
    }

    Ok(GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: ANALYSIS_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: Blob {
                        mime_type: payload
                            .mime_type
                            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
                            .to_string(),
                        data: payload.data.to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig::default(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use roomfit_core::analysis::{KNOWN_CATEGORIES, REQUIRED_FIELDS};

    use super::*;

    #[test]
    fn raw_base64_passes_through() {
        let payload = strip_data_url("iVBORw0KGgo=");
        assert_eq!(payload.data, "iVBORw0KGgo=");
        assert_eq!(payload.mime_type, None);
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let payload = strip_data_url("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(payload.data, "iVBORw0KGgo=");
        assert_eq!(payload.mime_type, Some("image/png"));
    }

    #[test]
    fn non_image_mime_is_ignored() {
        let payload = strip_data_url("data:text/plain;base64,aGVsbG8=");
        assert_eq!(payload.data, "aGVsbG8=");
        assert_eq!(payload.mime_type, None);
    }

    #[test]
    fn empty_payload_is_missing_input() {
        assert_matches!(build_analysis_request(""), Err(AnalysisError::MissingInput));
        assert_matches!(build_analysis_request("   "), Err(AnalysisError::MissingInput));
        assert_matches!(
            build_analysis_request("data:image/jpeg;base64,"),
            Err(AnalysisError::MissingInput)
        );
    }

    #[test]
    fn request_serializes_to_gemini_shape() {
        let request = build_analysis_request("data:image/webp;base64,UklGRg==").unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], ANALYSIS_PROMPT);
        assert_eq!(
            body["contents"][0]["parts"][1],
            json!({ "inlineData": { "mimeType": "image/webp", "data": "UklGRg==" } })
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["generationConfig"]["topK"], 40);
        let top_p = body["generationConfig"]["topP"].as_f64().unwrap();
        assert!((top_p - 0.8).abs() < 1e-6);
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn default_mime_is_jpeg() {
        let request = build_analysis_request("/9j/4AAQ").unwrap();
        assert_matches!(
            &request.contents[0].parts[1],
            Part::InlineData { inline_data } if inline_data.mime_type == "image/jpeg"
        );
    }

    #[test]
    fn prompt_names_schema_and_vocabulary() {
        for field in REQUIRED_FIELDS {
            assert!(ANALYSIS_PROMPT.contains(&format!("\"{field}\"")));
        }
        for category in KNOWN_CATEGORIES {
            assert!(ANALYSIS_PROMPT.contains(category));
        }
        assert!(ANALYSIS_PROMPT.contains("Return ONLY the JSON object"));
    }
}
