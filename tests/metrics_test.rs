use smartoilgauge_exporter::metrics::{MetricsCollector, TANK_LABELS};

#[test]
fn test_metrics_registration() {
    // Verify that all metrics can be created and registered without panicking
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");

    // Labelled gauges only appear once a series exists
    let output = metrics.render().expect("Failed to render metrics");
    assert!(!output.contains("sensor_gallons"));
}

#[test]
fn test_exported_names_and_help() {
    let metrics = MetricsCollector::new().expect("Failed to create metrics collector");
    let labels = ["7", "Garage", "02101"];
    metrics.set_gauge(&metrics.sensor_gallons, &labels, 1.0);
    metrics.set_gauge(&metrics.nominal_tank_gallons, &labels, 2.0);
    metrics.set_gauge(&metrics.fillable_tank_gallons, &labels, 3.0);

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("# TYPE sensor_gallons gauge"));
    assert!(rendered.contains("# TYPE nominal_tank_gallons gauge"));
    assert!(rendered.contains("# TYPE fillable_tank_gallons gauge"));
    assert!(rendered.contains("# HELP sensor_gallons The number of gallons detected by the sensor"));
    assert!(rendered.contains("# HELP nominal_tank_gallons The size of the oil tank"));
    assert!(rendered.contains("# HELP fillable_tank_gallons The fillable size of the oil tank"));
}

#[test]
fn test_label_names() {
    assert_eq!(TANK_LABELS, ["tank_id", "tank_name", "zipcode"]);
}

#[test]
fn test_clones_share_registry() {
    // The scrape task and the HTTP handler hold separate clones
    let metrics = MetricsCollector::new().unwrap();
    let serving = metrics.clone();

    metrics.set_gauge(&metrics.sensor_gallons, &["1", "Shed", "05001"], 42.0);

    assert!(serving
        .render()
        .unwrap()
        .contains("sensor_gallons{tank_id=\"1\",tank_name=\"Shed\",zipcode=\"05001\"} 42"));
}
