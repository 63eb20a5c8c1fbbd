use crate::helpers::{spawn_app, MockClimateAccess};
use climate::RangeFilter;
use std::sync::Arc;

#[tokio::test]
async fn index_lists_available_routes() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new()), RangeFilter::ReferenceWindow);

    let (status, body) = test_app.get("/").await;

    assert!(status.is_success());
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Welcome to Honolulu, Hawaii!"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/start/end"));
    assert!(html.contains("2016-08-23"));
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new()), RangeFilter::ReferenceWindow);

    let (status, _) = test_app.get("/docs").await;

    assert!(status.is_success());
}

#[tokio::test]
async fn unknown_nested_route_is_not_found() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new()), RangeFilter::ReferenceWindow);

    let (status, _) = test_app.get("/api/v1.0/a/b/c").await;

    assert_eq!(status.as_u16(), 404);
}
