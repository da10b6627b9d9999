use crate::config::IdentityConfig;
use errors::{IdentityError, IdentityResult};
use sv_core::RequestContext;
use tracing::error;

/// Credential source selected for a request context.
///
/// Selection runs once, at first session access. Precedence is fixed: the
/// admin flag wins over a pre-validated introspection payload, which wins
/// over a raw token; the first matching source is used with no fallthrough.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Service-wide administrative credential from process configuration.
    /// Ignores every other context field.
    AdminCredential {
        auth_url: String,
        username: String,
        password: String,
        project_name: String,
        user_domain: String,
        project_domain: String,
    },
    /// Pre-validated token introspection payload combined with the raw
    /// token. Re-uses already-validated identity data without another
    /// authentication round trip.
    TokenInfo {
        token: Option<String>,
        token_info: serde_json::Value,
    },
    /// Raw token to be re-validated against the identity endpoint.
    Token { auth_url: String, token: String },
}

impl AuthStrategy {
    pub fn select(context: &RequestContext, config: &IdentityConfig) -> IdentityResult<Self> {
        if context.is_admin {
            let admin = &config.admin;
            Ok(Self::AdminCredential {
                auth_url: config.auth_url(),
                username: admin.username.clone(),
                password: admin.password.clone(),
                project_name: admin.project_name.clone(),
                user_domain: admin.user_domain.clone(),
                project_domain: admin.project_domain.clone(),
            })
        } else if let Some(token_info) = &context.auth_token_info {
            Ok(Self::TokenInfo {
                token: context.auth_token.clone(),
                token_info: token_info.clone(),
            })
        } else if let Some(token) = &context.auth_token {
            Ok(Self::Token {
                auth_url: config.auth_url(),
                token: token.clone(),
            })
        } else {
            error!("Identity service connection failed: no password or token found in request context");
            Err(IdentityError::AuthorizationFailure)
        }
    }
}
