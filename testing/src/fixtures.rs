use async_trait::async_trait;
use catalog::{CatalogApi, DOCKER_FORMAT, ImageFilters, ImageRecord};
use errors::{CatalogError, CatalogResult};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use sv_core::{ProjectId, RequestContext, UserId};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

pub fn admin_context() -> RequestContext {
    RequestContext::admin()
}

pub fn token_context(token: &str) -> RequestContext {
    RequestContext::with_token(token.to_string())
}

/// Context carrying a pre-validated introspection payload alongside the raw
/// token, as the request pipeline populates it after token validation.
pub fn introspected_context(token: &str) -> RequestContext {
    RequestContext {
        project_id: ProjectId::new("test-project".to_string()),
        user_id: UserId::new("test-user".to_string()),
        auth_token: Some(token.to_string()),
        auth_token_info: Some(json!({
            "token": {
                "user": {"id": "test-user", "name": "tester"},
                "project": {"id": "test-project", "name": "testing"},
                "methods": ["password"],
            }
        })),
        ..RequestContext::default()
    }
}

pub fn anonymous_context() -> RequestContext {
    RequestContext::default()
}

pub fn docker_image(id: &str, name: &str) -> ImageRecord {
    image_with_format(id, name, DOCKER_FORMAT)
}

pub fn image_with_format(id: &str, name: &str, container_format: &str) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        name: name.to_string(),
        container_format: container_format.to_string(),
        status: Some("active".to_string()),
        size: Some(1024),
        tags: vec![],
    }
}

/// In-memory catalog backend for resolver tests.
pub struct FakeCatalog {
    images: Vec<ImageRecord>,
}

impl FakeCatalog {
    pub fn new(images: Vec<ImageRecord>) -> Self {
        Self { images }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_image(&self, image_id: &str) -> CatalogResult<ImageRecord> {
        self.images
            .iter()
            .find(|i| i.id == image_id)
            .cloned()
            .ok_or_else(|| CatalogError::ImageNotFound {
                image: image_id.to_string(),
            })
    }

    async fn list_images(&self, filters: &ImageFilters) -> CatalogResult<Vec<ImageRecord>> {
        Ok(self
            .images
            .iter()
            .filter(|i| {
                filters
                    .container_format
                    .as_deref()
                    .is_none_or(|format| i.container_format == format)
            })
            .cloned()
            .collect())
    }
}
