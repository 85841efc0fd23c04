use std::path::PathBuf;

/// Default Gemini REST base URL (API version included).
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default multimodal model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Covers the model call.
    pub request_timeout_secs: u64,
    /// Optional catalog file replacing the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    /// Model API settings.
    pub gemini: GeminiConfig,
}

/// Gemini API settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key. `None` keeps the server up but fails analysis requests.
    pub api_key: Option<String>,
    /// REST base URL.
    pub api_url: String,
    /// Model name.
    pub model: String,
}

// Redacts the API key.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiConfig {
    /// Load from `GOOGLE_API_KEY`, `GEMINI_API_URL`, `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let api_url =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.into());

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into());

        Self {
            api_key,
            api_url,
            model,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                            |
    /// |------------------------|----------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                          |
    /// | `PORT`                 | `8080`                                             |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`                            |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                                               |
    /// | `CATALOG_PATH`         | unset (bundled catalog)                            |
    /// | `GOOGLE_API_KEY`       | unset                                              |
    /// | `GEMINI_API_URL`       | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_MODEL`         | `gemini-2.5-flash`                                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let catalog_path = std::env::var("CATALOG_PATH").ok().map(PathBuf::from);

        let gemini = GeminiConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            catalog_path,
            gemini,
        }
    }
}
