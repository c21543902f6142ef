//! Tank Metrics Collector
//!
//! Projects each tank from a scrape onto the three tank gauges.
//!
//! # Metrics Produced
//! - `sensor_gallons` - from the tank's `sensor_gallons` field
//! - `nominal_tank_gallons` - from the tank's `nominal` field
//! - `fillable_tank_gallons` - from the tank's `fillable` field
//!
//! All labelled `tank_id`, `tank_name`, `zipcode`.
//!
//! Every field is parsed on its own. A value that does not parse is logged and
//! skipped; it never blocks the tank's other gauges or other tanks.

use super::{CollectionContext, CollectionResult, CollectionStatus};
use crate::error::ExporterError;
use crate::metrics::MetricsCollector;
use crate::smartoil::types::TankDetails;
use crate::smartoil::Transport;
use prometheus::GaugeVec;
use tracing::{error, info, warn};

/// Counts from one projection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub tanks: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Parse a string-encoded gallon value.
///
/// An absent field is reported the same way as an unparseable one. Surrounding
/// whitespace is not stripped.
pub fn parse_gallons(field: &'static str, raw: Option<&str>) -> Result<f64, ExporterError> {
    let value = raw.unwrap_or_default();
    value.parse::<f64>().map_err(|source| ExporterError::FieldParse {
        field,
        value: value.to_string(),
        source,
    })
}

/// Update the tank gauges from a scraped tank list.
pub fn project_tanks(metrics: &MetricsCollector, tanks: &[TankDetails]) -> ProjectionSummary {
    let mut summary = ProjectionSummary {
        tanks: tanks.len(),
        ..Default::default()
    };

    for tank in tanks {
        let labels = [
            tank.tank_id.as_str(),
            tank.tank_name.as_str(),
            tank.zip_code.as_str(),
        ];

        let fields: [(&'static str, Option<&str>, &GaugeVec); 3] = [
            (
                "sensor_gallons",
                tank.sensor_gallons.as_deref(),
                &*metrics.sensor_gallons,
            ),
            ("nominal", tank.nominal.as_deref(), &*metrics.nominal_tank_gallons),
            (
                "fillable",
                tank.fillable.as_deref(),
                &*metrics.fillable_tank_gallons,
            ),
        ];

        for (field, raw, gauge) in fields {
            match parse_gallons(field, raw) {
                Ok(value) => {
                    metrics.set_gauge(gauge, &labels, value);
                    summary.updated += 1;
                }
                Err(e) => {
                    warn!("Tank {} ({}): {}", tank.tank_id, tank.tank_name, e);
                    summary.skipped += 1;
                }
            }
        }
    }

    summary
}

/// Scrape the dashboard and update the tank gauges.
///
/// # Returns
///
/// * `Ok(CollectionStatus::Success)` - Tanks were scraped and projected
/// * `Ok(CollectionStatus::Failed)` - The scrape failed; gauges keep their last values
pub async fn collect_tank_metrics<T: Transport>(
    ctx: &mut CollectionContext<'_, T>,
) -> CollectionResult {
    match ctx.client.scrape_tanks().await {
        Ok(outcome) => {
            let summary = project_tanks(ctx.metrics, &outcome.tanks);
            info!(
                "Updated tank metrics: {} tanks, {} gauges set, {} fields skipped",
                summary.tanks, summary.updated, summary.skipped
            );
            Ok(CollectionStatus::Success)
        }
        Err(e) => {
            error!("Failed to scrape tanks: {}", e);
            Ok(CollectionStatus::Failed)
        }
    }
}
