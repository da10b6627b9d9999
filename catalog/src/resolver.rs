use crate::client::{CatalogApi, ImageFilters, ImageRecord, create_catalog_client};
use crate::config::CatalogConfig;
use errors::{CatalogError, CatalogResult};
use std::sync::Arc;
use sv_core::RequestContext;
use uuid::Uuid;

/// Resolves a user-supplied image identifier to catalog records.
///
/// Holds no mutable state; every resolution call re-queries the catalog
/// service, so an instance is safe to share across tasks.
pub struct ImageResolver {
    client: Arc<dyn CatalogApi>,
}

impl ImageResolver {
    pub fn new(client: Arc<dyn CatalogApi>) -> Self {
        Self { client }
    }

    pub fn from_context(context: &RequestContext, config: &CatalogConfig) -> CatalogResult<Self> {
        Ok(Self::new(create_catalog_client(context, config)?))
    }

    /// Resolves `identifier` to exactly one eligible record.
    ///
    /// Zero matches fail with `ImageNotFound`; several matches fail with
    /// `Conflict`, directing the caller to disambiguate by image id.
    pub async fn find_image(&self, identifier: &str) -> CatalogResult<ImageRecord> {
        let mut matches = self.find_images(identifier, true).await?;
        if matches.is_empty() {
            return Err(CatalogError::ImageNotFound {
                image: identifier.to_string(),
            });
        }
        if matches.len() > 1 {
            return Err(CatalogError::Conflict {
                message: format!(
                    "Multiple images exist with same name {}. Please use the image id instead.",
                    identifier
                ),
            });
        }
        Ok(matches.remove(0))
    }

    /// All eligible records matching `identifier`.
    ///
    /// A UUID-shaped identifier is looked up directly; the record is kept
    /// only when its container format is eligible, so a non-docker hit
    /// yields an empty result rather than an error. Anything else lists
    /// docker-format records and filters by name, exactly or by substring.
    /// Never raises on zero or many matches.
    pub async fn find_images(
        &self,
        identifier: &str,
        exact_match: bool,
    ) -> CatalogResult<Vec<ImageRecord>> {
        if is_uuid_like(identifier) {
            let image = self.client.get_image(identifier).await?;
            if image.is_eligible() {
                Ok(vec![image])
            } else {
                Ok(vec![])
            }
        } else {
            let images = self.client.list_images(&ImageFilters::docker()).await?;
            let images = if exact_match {
                images.into_iter().filter(|i| i.name == identifier).collect()
            } else {
                images
                    .into_iter()
                    .filter(|i| i.name.contains(identifier))
                    .collect()
            };
            Ok(images)
        }
    }
}

/// Purely syntactic identifier classification, independent of context.
/// Accepts hyphenated and bare 32-hex-digit forms.
pub fn is_uuid_like(identifier: &str) -> bool {
    Uuid::try_parse(identifier).is_ok()
}
