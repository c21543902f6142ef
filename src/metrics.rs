//! Prometheus Metrics Definitions
//!
//! This module defines the gauges exposed by the SmartOilGauge exporter.
//!
//! # Metrics
//!
//! - `sensor_gallons` - Gallons currently detected by the tank sensor
//! - `nominal_tank_gallons` - Nominal size of the tank
//! - `fillable_tank_gallons` - Fillable capacity of the tank
//!
//! All three carry the labels `tank_id`, `tank_name` and `zipcode`. The names are
//! unprefixed so existing dashboards keep working.
//!
//! Values are overwritten on every successful scrape and otherwise left alone, so a
//! failed cycle keeps exporting the last good reading.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Label names shared by every tank gauge
pub const TANK_LABELS: [&str; 3] = ["tank_id", "tank_name", "zipcode"];

/// Metrics collector for SmartOilGauge tanks
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    pub sensor_gallons: Arc<GaugeVec>,
    pub nominal_tank_gallons: Arc<GaugeVec>,
    pub fillable_tank_gallons: Arc<GaugeVec>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let sensor_gallons = GaugeVec::new(
            Opts::new(
                "sensor_gallons",
                "The number of gallons detected by the sensor",
            ),
            &TANK_LABELS,
        )?;

        let nominal_tank_gallons = GaugeVec::new(
            Opts::new("nominal_tank_gallons", "The size of the oil tank"),
            &TANK_LABELS,
        )?;

        let fillable_tank_gallons = GaugeVec::new(
            Opts::new(
                "fillable_tank_gallons",
                "The fillable size of the oil tank",
            ),
            &TANK_LABELS,
        )?;

        registry.register(Box::new(sensor_gallons.clone()))?;
        registry.register(Box::new(nominal_tank_gallons.clone()))?;
        registry.register(Box::new(fillable_tank_gallons.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            sensor_gallons: Arc::new(sensor_gallons),
            nominal_tank_gallons: Arc::new(nominal_tank_gallons),
            fillable_tank_gallons: Arc::new(fillable_tank_gallons),
        })
    }

    /// Set one labelled gauge, creating the series if needed.
    pub fn set_gauge(&self, gauge: &GaugeVec, labels: &[&str], value: f64) {
        gauge.with_label_values(labels).set(value);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
