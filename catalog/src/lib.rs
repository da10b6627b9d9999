pub mod client;
pub mod config;
pub mod resolver;

pub use client::{
    CatalogApi, DOCKER_FORMAT, HttpCatalogClient, ImageFilters, ImageRecord, create_catalog_client,
};
pub use config::CatalogConfig;
pub use resolver::ImageResolver;
