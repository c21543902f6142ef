//! Edge case tests
//!
//! Tests for unusual but valid dashboard data.

use serde_json::json;
use smartoilgauge_exporter::collectors::project_tanks;
use smartoilgauge_exporter::metrics::MetricsCollector;
use smartoilgauge_exporter::smartoil::types::{TankDetails, TankListResponse};

/// Helper to create a test metrics instance
fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

#[test]
fn test_tank_name_with_quotes_is_escaped() {
    // Given: A tank name containing quotes and a backslash
    let metrics = create_test_metrics();
    let tank: TankDetails = serde_json::from_value(json!({
        "tank_id": "3", "tank_name": "Mom's \"big\" tank\\", "zip_code": "02101",
        "sensor_gallons": "10"
    }))
    .unwrap();

    // When: Projecting and rendering
    project_tanks(&metrics, &[tank]);
    let rendered = metrics.render().expect("Failed to render");

    // Then: The label value is escaped per the exposition format
    assert!(rendered.contains(r#"tank_name="Mom's \"big\" tank\\""#));
}

#[test]
fn test_zip_code_keeps_leading_zero() {
    let metrics = create_test_metrics();
    let tank: TankDetails = serde_json::from_value(json!({
        "tank_id": "1", "tank_name": "Cellar", "zip_code": "01001", "fillable": "200"
    }))
    .unwrap();

    project_tanks(&metrics, &[tank]);

    assert!(metrics.render().unwrap().contains("zipcode=\"01001\""));
}

#[test]
fn test_zero_and_negative_readings_are_exported() {
    // A sensor reporting below the dead zone can produce zero or negative gallons
    let metrics = create_test_metrics();
    let tank: TankDetails = serde_json::from_value(json!({
        "tank_id": "1", "tank_name": "Cellar", "zip_code": "01001",
        "sensor_gallons": "0", "nominal": "-1.5"
    }))
    .unwrap();

    let summary = project_tanks(&metrics, &[tank]);

    assert_eq!(summary.updated, 2);
    assert_eq!(
        metrics
            .nominal_tank_gallons
            .with_label_values(&["1", "Cellar", "01001"])
            .get(),
        -1.5
    );
}

#[test]
fn test_tanks_sharing_name_are_distinct_series() {
    let metrics = create_test_metrics();
    let response: TankListResponse = serde_json::from_value(json!({
        "result": "ok",
        "tanks": [
            {"tank_id": "1", "tank_name": "Tank", "zip_code": "02101", "sensor_gallons": "10"},
            {"tank_id": "2", "tank_name": "Tank", "zip_code": "02101", "sensor_gallons": "20"}
        ]
    }))
    .unwrap();

    project_tanks(&metrics, &response.tanks);

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("sensor_gallons{tank_id=\"1\",tank_name=\"Tank\",zipcode=\"02101\"} 10"));
    assert!(rendered.contains("sensor_gallons{tank_id=\"2\",tank_name=\"Tank\",zipcode=\"02101\"} 20"));
}

#[test]
fn test_missing_identity_fields_use_empty_labels() {
    let metrics = create_test_metrics();
    let tank: TankDetails = serde_json::from_value(json!({"sensor_gallons": "5"})).unwrap();

    project_tanks(&metrics, &[tank]);

    assert!(metrics
        .render()
        .unwrap()
        .contains("sensor_gallons{tank_id=\"\",tank_name=\"\",zipcode=\"\"} 5"));
}
