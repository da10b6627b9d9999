use crate::config::CatalogConfig;
use async_trait::async_trait;
use errors::{CatalogError, CatalogResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sv_core::RequestContext;
use tracing::debug;

/// Container format a catalog record must carry to be eligible for
/// resolution.
pub const DOCKER_FORMAT: &str = "docker";

/// Read-only snapshot of a catalog entry; fetched per call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub container_format: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ImageRecord {
    pub fn is_eligible(&self) -> bool {
        self.container_format == DOCKER_FORMAT
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageFilters {
    pub container_format: Option<String>,
}

impl ImageFilters {
    pub fn docker() -> Self {
        Self {
            container_format: Some(DOCKER_FORMAT.to_string()),
        }
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_image(&self, image_id: &str) -> CatalogResult<ImageRecord>;
    async fn list_images(&self, filters: &ImageFilters) -> CatalogResult<Vec<ImageRecord>>;
}

pub struct HttpCatalogClient {
    http: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig, auth_token: Option<String>) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(CatalogError::Http)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    async fn request(&self, url: &str) -> CatalogResult<reqwest::Response> {
        debug!(url = %url, "Making catalog API request");
        let mut request = self.http.get(url).header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            request = request.header("X-Auth-Token", token);
        }
        Ok(request.send().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ImageListResponse {
    images: Vec<ImageRecord>,
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn get_image(&self, image_id: &str) -> CatalogResult<ImageRecord> {
        let url = format!("{}/v2/images/{}", self.endpoint, image_id);
        let response = self.request(&url).await?;

        match response.status() {
            StatusCode::OK => {
                let image = response.json::<ImageRecord>().await?;
                Ok(image)
            }
            StatusCode::NOT_FOUND => Err(CatalogError::ImageNotFound {
                image: image_id.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(CatalogError::Authentication {
                reason: "catalog service rejected the request token".to_string(),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(CatalogError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn list_images(&self, filters: &ImageFilters) -> CatalogResult<Vec<ImageRecord>> {
        let mut url = format!("{}/v2/images", self.endpoint);
        if let Some(format) = &filters.container_format {
            url.push_str(&format!("?container_format={}", format));
        }
        let response = self.request(&url).await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.json::<ImageListResponse>().await?;
                Ok(body.images)
            }
            StatusCode::UNAUTHORIZED => Err(CatalogError::Authentication {
                reason: "catalog service rejected the request token".to_string(),
            }),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(CatalogError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Creates a catalog client for the request context.
pub fn create_catalog_client(
    context: &RequestContext,
    config: &CatalogConfig,
) -> CatalogResult<Arc<dyn CatalogApi>> {
    let client = HttpCatalogClient::new(config, context.auth_token.clone())?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_records_are_eligible() {
        let record = ImageRecord {
            id: "img-1".to_string(),
            name: "nginx".to_string(),
            container_format: DOCKER_FORMAT.to_string(),
            status: None,
            size: None,
            tags: vec![],
        };
        assert!(record.is_eligible());
    }

    #[test]
    fn test_other_formats_are_not_eligible() {
        let record = ImageRecord {
            id: "img-2".to_string(),
            name: "cirros".to_string(),
            container_format: "ami".to_string(),
            status: None,
            size: None,
            tags: vec![],
        };
        assert!(!record.is_eligible());
    }

    #[test]
    fn test_record_deserializes_with_sparse_fields() {
        let record: ImageRecord = serde_json::from_str(
            r#"{"id": "img-3", "name": "alpine", "container_format": "docker"}"#,
        )
        .unwrap();
        assert_eq!(record.name, "alpine");
        assert!(record.tags.is_empty());
    }
}
