use catalog::ImageResolver;
use errors::CatalogError;
use std::sync::Arc;
use testing::{FakeCatalog, docker_image, image_with_format, unique_id};

const UUID_A: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
const UUID_B: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn resolver(images: Vec<catalog::ImageRecord>) -> ImageResolver {
    ImageResolver::new(Arc::new(FakeCatalog::new(images)))
}

#[tokio::test]
async fn test_exact_name_match_returns_single_record() {
    let resolver = resolver(vec![
        docker_image(UUID_A, "nginx"),
        docker_image(UUID_B, "redis"),
    ]);

    let image = resolver.find_image("nginx").await.unwrap();
    assert_eq!(image.id, UUID_A);
}

#[tokio::test]
async fn test_duplicate_names_conflict_on_find_image() {
    let resolver = resolver(vec![
        docker_image(UUID_A, "nginx"),
        docker_image(UUID_B, "nginx"),
    ]);

    let err = resolver.find_image("nginx").await.unwrap_err();
    match err {
        CatalogError::Conflict { message } => {
            assert!(message.contains("nginx"));
            assert!(message.contains("image id"));
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_names_are_all_returned_by_find_images() {
    let resolver = resolver(vec![
        docker_image(UUID_A, "nginx"),
        docker_image(UUID_B, "nginx"),
    ]);

    let images = resolver.find_images("nginx", true).await.unwrap();
    assert_eq!(images.len(), 2);
}

#[tokio::test]
async fn test_unknown_name_is_not_found() {
    let resolver = resolver(vec![docker_image(UUID_A, "nginx")]);
    let name = unique_id("missing");

    let err = resolver.find_image(&name).await.unwrap_err();
    match err {
        CatalogError::ImageNotFound { image } => assert_eq!(image, name),
        other => panic!("expected not-found, got {:?}", other),
    }

    let images = resolver.find_images(&name, true).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_uuid_lookup_returns_docker_record() {
    let resolver = resolver(vec![docker_image(UUID_A, "nginx")]);

    let image = resolver.find_image(UUID_A).await.unwrap();
    assert_eq!(image.name, "nginx");
}

#[tokio::test]
async fn test_uuid_hit_on_non_docker_record_is_empty_not_error() {
    let resolver = resolver(vec![image_with_format(UUID_A, "cirros", "ami")]);

    let images = resolver.find_images(UUID_A, true).await.unwrap();
    assert!(images.is_empty());

    let err = resolver.find_image(UUID_A).await.unwrap_err();
    assert!(matches!(err, CatalogError::ImageNotFound { .. }));
}

#[tokio::test]
async fn test_uuid_miss_propagates_not_found_from_catalog() {
    let resolver = resolver(vec![docker_image(UUID_A, "nginx")]);

    let err = resolver.find_images(UUID_B, true).await.unwrap_err();
    match err {
        CatalogError::ImageNotFound { image } => assert_eq!(image, UUID_B),
        other => panic!("expected not-found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_docker_records_never_match_by_name() {
    let resolver = resolver(vec![
        image_with_format(UUID_A, "nginx", "ami"),
        docker_image(UUID_B, "nginx"),
    ]);

    let image = resolver.find_image("nginx").await.unwrap();
    assert_eq!(image.id, UUID_B);
}

#[tokio::test]
async fn test_exact_and_substring_matching() {
    // One docker record named "nginx", one named "nginx-alpine".
    let resolver = resolver(vec![
        docker_image(UUID_A, "nginx"),
        docker_image(UUID_B, "nginx-alpine"),
    ]);

    let image = resolver.find_image("nginx").await.unwrap();
    assert_eq!(image.id, UUID_A);

    let images = resolver.find_images("nginx", false).await.unwrap();
    assert_eq!(images.len(), 2);
}
