#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure kinds of the room analysis pipeline.
///
/// Each stage of request building, upstream call, envelope extraction and
/// normalization maps to exactly one variant, so logs can tell "the model
/// said nothing" apart from "the model said something that was not JSON"
/// apart from "it was JSON but incomplete".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No image payload was supplied (or it was empty after prefix stripping).
    #[error("No image provided")]
    MissingInput,

    /// The model API key is not configured.
    #[error("Model API credential not configured")]
    MissingCredential,

    /// The model API answered with a non-success status.
    #[error("Model API error ({status}): {body}")]
    UpstreamHttp {
        /// HTTP status code returned upstream.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// The model API could not be reached (DNS, TLS, connection reset, ...).
    #[error("Model API request failed: {0}")]
    Transport(String),

    /// The reply envelope contained no candidates.
    #[error("Model reply contained no candidates")]
    EmptyCandidate,

    /// The first candidate carried no text content.
    #[error("Model reply candidate contained no text")]
    EmptyContent,

    /// No JSON object span could be located in the reply text.
    #[error("No JSON object found in model reply")]
    NoJsonFound,

    /// A JSON span was located but did not parse.
    #[error("Invalid JSON in model reply: {0}")]
    JsonParse(String),

    /// JSON parsed but required fields were missing, empty, or mistyped.
    #[error("Analysis missing required fields: {}", fields.join(", "))]
    SchemaViolation {
        /// Names of the offending fields, in schema order.
        fields: Vec<&'static str>,
    },
}

impl AnalysisError {
    /// How far the normalizer got before this failure.
    ///
    /// Used to report the most advanced failure when every strategy fails:
    /// a schema violation is more informative than a parse error, which is
    /// more informative than finding no JSON at all.
    pub fn depth(&self) -> u8 {
        match self {
            AnalysisError::SchemaViolation { .. } => 3,
            AnalysisError::JsonParse(_) => 2,
            AnalysisError::NoJsonFound => 1,
            _ => 0,
        }
    }
}
