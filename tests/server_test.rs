//! Server integration tests
//!
//! Tests for the metrics endpoint.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use smartoilgauge_exporter::metrics::MetricsCollector;
use smartoilgauge_exporter::server::router;
use tower::ServiceExt;

/// Helper to create a test metrics instance
fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

async fn get(app: axum::Router, path: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .expect("request failed");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap(), content_type)
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    // Given: A metrics collector with a tank reading
    let metrics = create_test_metrics();
    metrics
        .sensor_gallons
        .with_label_values(&["7", "Garage", "02101"])
        .set(123.4);

    // When: Requesting the metrics path
    let (status, body, content_type) = get(router(metrics, "/metrics"), "/metrics").await;

    // Then: Output should be valid Prometheus text
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(prometheus::TEXT_FORMAT));
    assert!(body.contains("# HELP sensor_gallons"));
    assert!(body.contains("sensor_gallons{tank_id=\"7\",tank_name=\"Garage\",zipcode=\"02101\"} 123.4"));
}

#[tokio::test]
async fn test_custom_metrics_path() {
    let app = router(create_test_metrics(), "/oil/metrics");

    let (status, _, _) = get(app.clone(), "/oil/metrics").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_no_other_routes() {
    let app = router(create_test_metrics(), "/metrics");

    for path in ["/", "/health", "/metrics/extra"] {
        let (status, _, _) = get(app.clone(), path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "unexpected route {}", path);
    }
}

#[test]
fn test_metrics_rendering_is_stable() {
    // Given: A metrics collector with a metric set
    let metrics = create_test_metrics();
    metrics
        .nominal_tank_gallons
        .with_label_values(&["7", "Garage", "02101"])
        .set(275.0);

    // When: Rendering the same metrics twice
    let render1 = metrics.render().expect("First render failed");
    let render2 = metrics.render().expect("Second render failed");

    // Then: Both renderings should be identical
    assert_eq!(render1, render2, "Metrics rendering is not stable");
}
