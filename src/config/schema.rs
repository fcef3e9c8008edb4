//! Configuration schema for mythogen.toml.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MythogenConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,

    /// Generative-text backend base URL (OpenAI-compatible chat API).
    pub backend_api_url: String,

    /// Backend API key. Usually left empty here and supplied via
    /// MYTHOGEN_API_KEY or GEMINI_API_KEY.
    pub backend_api_key: String,

    /// Model identifier sent to the backend.
    pub model: String,

    /// Maximum output tokens per generation call.
    pub max_output_tokens: u32,

    /// Sampling temperature for generation calls.
    pub temperature: f64,

    /// Per-attempt timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,

    /// Output language used when a request does not specify one.
    pub default_language: String,

    /// Complexity used when a request does not specify one.
    pub default_complexity: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for MythogenConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            backend_api_url: "https://api.openai.com".into(),
            backend_api_key: String::new(),
            model: "gpt-4o-mini".into(),
            max_output_tokens: 8192,
            temperature: 0.9,
            request_timeout_secs: 60,
            default_language: "Turkish".into(),
            default_complexity: "medium".into(),
            log_level: "info".into(),
        }
    }
}

impl MythogenConfig {
    /// Apply environment overrides on top of the file-loaded values.
    ///
    /// MYTHOGEN_API_KEY (or GEMINI_API_KEY) replaces the API key; PORT
    /// rewrites the port of `listen_addr`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("MYTHOGEN_API_KEY") {
            if !key.is_empty() {
                self.backend_api_key = key;
            }
        } else if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.backend_api_key = key;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                let host = self
                    .listen_addr
                    .rsplit_once(':')
                    .map(|(host, _)| host)
                    .unwrap_or("0.0.0.0");
                self.listen_addr = format!("{host}:{port}");
            }
        }
    }

    /// Whether an API key is available for backend calls.
    pub fn has_api_key(&self) -> bool {
        !self.backend_api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = MythogenConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
        assert_eq!(cfg.default_language, "Turkish");
        assert_eq!(cfg.default_complexity, "medium");
        assert!(!cfg.has_api_key());
    }
}
