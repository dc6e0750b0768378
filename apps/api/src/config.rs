use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Resolved once at startup and passed by value into the pipeline; read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Process-wide default credential. A non-empty `api_key` in a request body wins over it.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub port: u16,
    /// Per-call deadline for completion requests. Unset means no deadline.
    pub llm_timeout_secs: Option<u64>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            port: 5001,
            llm_timeout_secs: None,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            port: match optional_env("PORT") {
                Some(port) => port
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            llm_timeout_secs: parse_timeout(optional_env("LLM_TIMEOUT_SECS"))?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_timeout(raw: Option<String>) -> Result<Option<u64>> {
    raw.map(|secs| {
        secs.parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")
    })
    .transpose()
}

/// Reads an environment variable, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
