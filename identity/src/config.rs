use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Identity service base URL as configured. Legacy deployments still
    /// point this at the v2.0 API; `auth_url` rewrites that known value.
    pub auth_uri: String,
    pub admin: AdminCredentialConfig,
    #[serde(default)]
    pub session: SessionOptions,
}

impl IdentityConfig {
    /// Endpoint used for authentication and token validation.
    ///
    /// Only the known legacy segment `v2.0` is rewritten to `v3`; URLs
    /// already on the current version pass through unchanged.
    pub fn auth_url(&self) -> String {
        self.auth_uri.replace("v2.0", "v3")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentialConfig {
    pub username: String,
    pub password: String,
    pub project_name: String,
    #[serde(default = "default_domain")]
    pub user_domain: String,
    #[serde(default = "default_domain")]
    pub project_domain: String,
}

fn default_domain() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOptions {
    pub timeout_seconds: u64,
    pub verify_tls: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            verify_tls: true,
        }
    }
}

impl SessionOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            auth_uri: String::new(),
            admin: AdminCredentialConfig {
                username: String::new(),
                password: String::new(),
                project_name: String::new(),
                user_domain: default_domain(),
                project_domain: default_domain(),
            },
            session: SessionOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_url_rewrites_legacy_version() {
        let config = IdentityConfig {
            auth_uri: "http://identity.local:5000/v2.0".to_string(),
            ..IdentityConfig::default()
        };
        assert_eq!(config.auth_url(), "http://identity.local:5000/v3");
    }

    #[test]
    fn test_auth_url_leaves_current_version_untouched() {
        let config = IdentityConfig {
            auth_uri: "http://identity.local:5000/v3".to_string(),
            ..IdentityConfig::default()
        };
        assert_eq!(config.auth_url(), "http://identity.local:5000/v3");
    }

    #[test]
    fn test_session_options_defaults() {
        let options = SessionOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(30));
        assert!(options.verify_tls);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: IdentityConfig = serde_json::from_str(
            r#"{
                "auth_uri": "http://identity.local:5000/v3",
                "admin": {
                    "username": "svc",
                    "password": "secret",
                    "project_name": "service"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.admin.user_domain, "default");
        assert_eq!(config.session.timeout_seconds, 30);
    }
}
