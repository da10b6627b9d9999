use crate::config::SessionOptions;
use crate::strategy::AuthStrategy;
use chrono::{DateTime, Utc};
use errors::{IdentityError, IdentityResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

/// Reusable authenticated transport handle for the identity service.
///
/// Owns the HTTP client built from the session options and the strategy
/// selected for the request context. The issued subject token is cached and
/// refreshed shortly before expiry.
#[derive(Debug)]
pub struct Session {
    http: Client,
    strategy: AuthStrategy,
    issued: RwLock<Option<IssuedToken>>,
}

#[derive(Debug)]
struct IssuedToken {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl IssuedToken {
    fn fresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > Utc::now() + chrono::Duration::minutes(5),
            None => true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(strategy: AuthStrategy, options: &SessionOptions) -> IdentityResult<Self> {
        let http = Client::builder()
            .timeout(options.timeout())
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()
            .map_err(IdentityError::Http)?;

        Ok(Self {
            http,
            strategy,
            issued: RwLock::new(None),
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Service token for the bound strategy.
    ///
    /// Admin and raw-token strategies authenticate against the identity
    /// endpoint and cache the issued subject token; the introspection
    /// strategy returns the already-validated token without a network call.
    pub async fn token(&self) -> IdentityResult<String> {
        if let AuthStrategy::TokenInfo { token, .. } = &self.strategy {
            return token
                .clone()
                .ok_or_else(|| IdentityError::Authentication {
                    reason: "token introspection payload carried no token".to_string(),
                });
        }

        {
            let cached = self.issued.read().await;
            if let Some(ref issued) = *cached {
                if issued.fresh() {
                    return Ok(issued.token.clone());
                }
            }
        }

        let issued = self.authenticate().await?;
        let token = issued.token.clone();
        let mut cached = self.issued.write().await;
        *cached = Some(issued);
        Ok(token)
    }

    async fn authenticate(&self) -> IdentityResult<IssuedToken> {
        let (auth_url, body) = match &self.strategy {
            AuthStrategy::AdminCredential {
                auth_url,
                username,
                password,
                project_name,
                user_domain,
                project_domain,
            } => (
                auth_url,
                json!({
                    "auth": {
                        "identity": {
                            "methods": ["password"],
                            "password": {
                                "user": {
                                    "name": username,
                                    "domain": {"name": user_domain},
                                    "password": password,
                                }
                            }
                        },
                        "scope": {
                            "project": {
                                "name": project_name,
                                "domain": {"name": project_domain},
                            }
                        }
                    }
                }),
            ),
            AuthStrategy::Token { auth_url, token } => (
                auth_url,
                json!({
                    "auth": {
                        "identity": {
                            "methods": ["token"],
                            "token": {"id": token},
                        }
                    }
                }),
            ),
            AuthStrategy::TokenInfo { .. } => {
                return Err(IdentityError::Authentication {
                    reason: "introspection strategy does not authenticate".to_string(),
                });
            }
        };

        let url = format!("{}/auth/tokens", auth_url.trim_end_matches('/'));
        debug!(url = %url, "Authenticating against identity service");

        let response = self.http.post(&url).json(&body).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let token = response
                    .headers()
                    .get("x-subject-token")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
                    .ok_or_else(|| IdentityError::Authentication {
                        reason: "token response carried no subject token".to_string(),
                    })?;
                let expires_at = response
                    .json::<TokenResponse>()
                    .await
                    .ok()
                    .and_then(|r| r.token.expires_at);
                Ok(IssuedToken { token, expires_at })
            }
            StatusCode::UNAUTHORIZED => Err(IdentityError::Authentication {
                reason: "identity service rejected the credential".to_string(),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(IdentityError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
