use std::path::PathBuf;

/// How strictly response bodies are matched against the known payload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Accept a bare array or any object carrying a `response` array.
    #[default]
    Lenient,
    /// Only the validated shapes: bare product arrays and
    /// `{code, response}` availability envelopes.
    Strict,
}

impl std::fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeMode::Lenient => write!(f, "lenient"),
            DecodeMode::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for DecodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(DecodeMode::Lenient),
            "strict" => Ok(DecodeMode::Strict),
            other => Err(format!(
                "unknown decode mode \"{other}\" (expected lenient or strict)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_root: String,
    pub categories: Vec<String>,
    pub decode_mode: DecodeMode,
    /// Value sent in the `x-force-error-mode` request header.
    pub force_error_mode: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub output_path: PathBuf,
    pub log_level: String,
}
