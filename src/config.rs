use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::service::AuditOptions;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub extraction: ExtractionConfig,
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Gemini extraction provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

// Keep the key out of startup logs.
impl std::fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Apply Regla Octava unless a request says otherwise
    pub regla_octava: bool,
    pub strict_unit_codes: bool,
    pub max_upload_bytes: usize,
}

impl AuditConfig {
    pub fn options(&self) -> AuditOptions {
        AuditOptions {
            regla_octava: self.regla_octava,
            strict_unit_codes: self.strict_unit_codes,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            extraction: ExtractionConfig {
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-3-pro-preview".to_string(),
                api_key: None,
                timeout_secs: 300,
            },
            audit: AuditConfig {
                regla_octava: false,
                strict_unit_codes: false,
                max_upload_bytes: 25 * 1024 * 1024,
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then `PEDIMENTO__SECTION__KEY` variables, then the plain
    /// `SERVER_HOST` / `SERVER_PORT` / `GEMINI_API_KEY` (or `API_KEY`) ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();

        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                Environment::with_prefix("PEDIMENTO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("extraction.api_key", api_key)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_config_builder() {
        let built: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(built.server.port, 8080);
        assert_eq!(built.extraction.model, "gemini-3-pro-preview");
        assert!(built.extraction.api_key.is_none());
        assert!(!built.audit.regla_octava);
        assert_eq!(built.audit.max_upload_bytes, 25 * 1024 * 1024);
    }

    #[test]
    fn overrides_replace_defaults() {
        let built: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default()).unwrap())
            .set_override("server.port", "9090")
            .unwrap()
            .set_override("audit.regla_octava", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(built.server.port, 9090);
        assert!(built.audit.options().regla_octava);
    }

    #[test]
    fn debug_hides_api_key() {
        let mut config = AppConfig::default();
        config.extraction.api_key = Some("secret".into());
        assert!(!format!("{config:?}").contains("secret"));
    }
}
