use crate::auth::{ACADEMY_ADMIN_SOURCE, DEFAULT_ALLOWED_ROLES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "https://api-staging-automation.staffpay.in";

/// Environment variable consulted for the base URL, at runtime and at build time.
pub const BASE_URL_ENV: &str = "ACADEMY_API_BASE_URL";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AcademyConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// `None` defers to the environment, then to [`DEFAULT_BASE_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            source: default_source(),
            timeout_secs: None,
        }
    }
}

fn default_source() -> String {
    ACADEMY_ADMIN_SOURCE.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuthConfig {
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allowed_roles: default_allowed_roles(),
        }
    }
}

fn default_allowed_roles() -> Vec<String> {
    DEFAULT_ALLOWED_ROLES.iter().map(|role| role.to_string()).collect()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl AcademyConfig {
    /// Resolves the base URL.
    ///
    /// Order: `cli_override`, the config file, `env_value` (the runtime
    /// `ACADEMY_API_BASE_URL`), the value baked in at build time, then
    /// [`DEFAULT_BASE_URL`]. Blank values are skipped and a trailing slash is
    /// removed.
    pub fn resolve_base_url(&self, cli_override: Option<&str>, env_value: Option<&str>) -> String {
        [
            cli_override,
            self.api.base_url.as_deref(),
            env_value,
            option_env!("ACADEMY_API_BASE_URL"),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AcademyConfig = toml::from_str("").unwrap();
        assert_eq!(config, AcademyConfig::default());
        assert_eq!(config.api.source, "ACADEMY_ADMIN");
        assert_eq!(
            config.auth.allowed_roles,
            vec!["ACADEMY_ADMIN", "ADMIN", "SUPER_ADMIN"]
        );
    }

    #[test]
    fn test_partial_sections() {
        let config: AcademyConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080/"
            timeout_secs = 30

            [export]
            directory = "/tmp/exports"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.api.source, "ACADEMY_ADMIN");
        assert_eq!(config.export.directory, Some(PathBuf::from("/tmp/exports")));
        assert_eq!(config.auth, AuthConfig::default());
    }

    #[test]
    fn test_base_url_priority() {
        let mut config = AcademyConfig::default();
        config.api.base_url = Some("http://file.example/".into());

        assert_eq!(
            config.resolve_base_url(Some("http://cli.example"), Some("http://env.example")),
            "http://cli.example"
        );
        assert_eq!(
            config.resolve_base_url(None, Some("http://env.example")),
            "http://file.example"
        );

        config.api.base_url = None;
        assert_eq!(
            config.resolve_base_url(Some("  "), Some("http://env.example")),
            "http://env.example"
        );
    }
}
