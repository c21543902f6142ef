//! Metrics Collectors
//!
//! Collectors turn one scrape of the SmartOilGauge dashboard into gauge updates.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` holding the dashboard client and the metrics
//! - Run the scrape
//! - Update Prometheus metrics
//! - Return `CollectionResult` (`Success` or `Failed`)
//!
//! # Error Handling
//!
//! A failed scrape is non-fatal: it is logged, returns `CollectionStatus::Failed`,
//! and leaves every gauge at its previous value.

use crate::metrics::MetricsCollector;
use crate::smartoil::{SmartOilClient, Transport};

/// Shared context passed to collectors
///
/// The client is borrowed mutably because a scrape may replace its session.
pub struct CollectionContext<'a, T: Transport> {
    /// Dashboard client owning the session
    pub client: &'a mut SmartOilClient<T>,
    /// Metrics collector for updating Prometheus metrics
    pub metrics: &'a MetricsCollector,
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged)
    Failed,
}

/// Result type for collector functions
///
/// - `Ok(CollectionStatus::Success)` = Collection succeeded
/// - `Ok(CollectionStatus::Failed)` = Collection failed but non-fatal (logged)
/// - `Err(_)` = Fatal error (should propagate)
pub type CollectionResult = Result<CollectionStatus, anyhow::Error>;

pub mod tank;

pub use tank::{collect_tank_metrics, project_tanks, ProjectionSummary};
