use crate::session::Session;
use errors::{IdentityError, IdentityResult};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Typed client for the identity service, bound 1:1 to a session.
pub struct IdentityClient {
    session: Arc<Session>,
    endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    project: Project,
}

impl IdentityClient {
    pub fn new(session: Arc<Session>, endpoint: String) -> Self {
        Self {
            session,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        resource: &str,
        id: &str,
    ) -> IdentityResult<T> {
        let token = self.session.token().await?;
        let url = format!("{}{}", self.endpoint, path);
        debug!(url = %url, "Making identity API request");

        let response = self
            .session
            .http()
            .get(&url)
            .header("X-Auth-Token", token)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.json::<T>().await?;
                Ok(body)
            }
            StatusCode::UNAUTHORIZED => Err(IdentityError::Authentication {
                reason: "identity service rejected the session token".to_string(),
            }),
            StatusCode::NOT_FOUND => Err(IdentityError::NotFound {
                resource: resource.to_string(),
                id: id.to_string(),
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

    pub async fn get_user(&self, user_id: &str) -> IdentityResult<User> {
        let response: UserResponse = self
            .get(&format!("/users/{}", user_id), "user", user_id)
            .await?;
        Ok(response.user)
    }

    pub async fn get_project(&self, project_id: &str) -> IdentityResult<Project> {
        let response: ProjectResponse = self
            .get(&format!("/projects/{}", project_id), "project", project_id)
            .await?;
        Ok(response.project)
    }
}
