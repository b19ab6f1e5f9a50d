use crate::utils::error::{Result, UnimatchError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Credentials shipped in sample `.env` files; any of these disables the
/// remote provider.
const PLACEHOLDER_KEYS: [&str; 5] = [
    "your-api-key-here",
    "your_api_key_here",
    "your-openai-api-key",
    "your_openai_api_key_here",
    "changeme",
];

pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty()
        || (key.starts_with("${") && key.ends_with('}'))
        || PLACEHOLDER_KEYS
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(key))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub provider: ProviderConfig,
    pub rate_limit: RateLimitConfig,
    pub synthesis: SynthesisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Pause before answering from local synthesis, so both paths feel alike.
    pub simulated_latency_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1500,
        }
    }
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UnimatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UnimatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Defaults overlaid with `OPENAI_API_KEY` / `OPENAI_BASE_URL`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Fills the credential and base URL from `lookup` where the file left
    /// them unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_missing = self
            .provider
            .api_key
            .as_deref()
            .map(is_placeholder_key)
            .unwrap_or(true);
        if key_missing {
            if let Some(key) = lookup(API_KEY_ENV) {
                self.provider.api_key = Some(key);
            }
        }

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.provider.base_url = base_url;
        }

        self
    }

    // Replaces ${VAR_NAME}; unknown variables stay literal.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UnimatchError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The credential, unless it is missing or a placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !is_placeholder_key(key))
    }

    pub fn remote_enabled(&self) -> bool {
        self.usable_api_key().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_seconds)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit.min_interval_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.synthesis.simulated_latency_ms)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("provider.base_url", &self.provider.base_url)?;
        validate_non_empty_string("provider.model", &self.provider.model)?;
        validate_range("provider.temperature", self.provider.temperature, 0.0, 2.0)?;
        validate_positive_number("provider.max_tokens", self.provider.max_tokens as u64, 1)?;
        validate_positive_number("provider.timeout_seconds", self.provider.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();

        assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.min_interval(), Duration::from_millis(3000));
        assert_eq!(config.simulated_latency(), Duration::from_millis(1500));
        assert!(!config.remote_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[provider]
base_url = "http://localhost:9000/v1"
api_key = "sk-live-123"
model = "gpt-4o-mini"
temperature = 0.2
max_tokens = 800
timeout_seconds = 5

[rate_limit]
min_interval_ms = 500

[synthesis]
simulated_latency_ms = 0
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.usable_api_key(), Some("sk-live-123"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.min_interval(), Duration::from_millis(500));
        assert_eq!(config.simulated_latency(), Duration::ZERO);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("UNIMATCH_TEST_SUBST_KEY", "sk-from-env");

        let toml_content = r#"
[provider]
api_key = "${UNIMATCH_TEST_SUBST_KEY}"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.usable_api_key(), Some("sk-from-env"));

        std::env::remove_var("UNIMATCH_TEST_SUBST_KEY");
    }

    #[test]
    fn test_unresolved_variable_disables_remote() {
        let toml_content = r#"
[provider]
api_key = "${UNIMATCH_TEST_NEVER_SET}"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_placeholder_keys() {
        assert!(is_placeholder_key(""));
        assert!(is_placeholder_key("  "));
        assert!(is_placeholder_key("YOUR-API-KEY-HERE"));
        assert!(is_placeholder_key("your_openai_api_key_here"));
        assert!(is_placeholder_key("${OPENAI_API_KEY}"));
        assert!(!is_placeholder_key("sk-proj-abc123"));
    }

    #[test]
    fn test_env_overrides_fill_missing_key_only() {
        let lookup = |name: &str| match name {
            API_KEY_ENV => Some("sk-env".to_string()),
            BASE_URL_ENV => Some("http://proxy.local/v1".to_string()),
            _ => None,
        };

        let config = ServiceConfig::default().with_env_overrides(lookup);
        assert_eq!(config.usable_api_key(), Some("sk-env"));
        assert_eq!(config.provider.base_url, "http://proxy.local/v1");

        let mut explicit = ServiceConfig::default();
        explicit.provider.api_key = Some("sk-file".to_string());
        let explicit = explicit.with_env_overrides(lookup);
        assert_eq!(explicit.usable_api_key(), Some("sk-file"));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[provider]
base_url = "invalid-url"
"#;
        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[provider]
temperature = 3.5
"#;
        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[provider]
timeout_seconds = 0
"#;
        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[provider]
model = "file-model"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.provider.model, "file-model");
    }
}
