//! Periodic scrape scheduling
//!
//! Runs a [`ScrapeJob`] on a background task: one cycle, then a fixed sleep,
//! forever. Cycles never overlap because the same task runs them back to back.
//!
//! [`SchedulerHandle::stop`] interrupts the sleep between cycles and hands the job
//! back; an in-flight cycle is allowed to finish first.

use crate::collectors::{self, CollectionContext, CollectionStatus};
use crate::metrics::MetricsCollector;
use crate::smartoil::{SmartOilClient, Transport};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// One unit of periodic work
#[async_trait]
pub trait ScrapeJob: Send + 'static {
    async fn run_cycle(&mut self) -> CollectionStatus;
}

/// Scrape the dashboard and project the result onto the tank gauges
pub struct TankScrapeJob<T: Transport> {
    pub client: SmartOilClient<T>,
    pub metrics: MetricsCollector,
}

impl<T: Transport> TankScrapeJob<T> {
    pub fn new(client: SmartOilClient<T>, metrics: MetricsCollector) -> Self {
        Self { client, metrics }
    }
}

#[async_trait]
impl<T: Transport + 'static> ScrapeJob for TankScrapeJob<T> {
    async fn run_cycle(&mut self) -> CollectionStatus {
        let mut ctx = CollectionContext {
            client: &mut self.client,
            metrics: &self.metrics,
        };
        match collectors::collect_tank_metrics(&mut ctx).await {
            Ok(status) => status,
            Err(e) => {
                error!("Failed to collect metrics: {}", e);
                CollectionStatus::Failed
            }
        }
    }
}

/// Fixed-delay scheduler for a [`ScrapeJob`]
pub struct ScrapeScheduler;

impl ScrapeScheduler {
    /// Run exactly one cycle on the caller's task.
    pub async fn run_once<J: ScrapeJob>(job: &mut J) -> CollectionStatus {
        job.run_cycle().await
    }

    /// Spawn the scrape loop. The first cycle starts immediately.
    pub fn start<J: ScrapeJob>(mut job: J, interval: Duration) -> SchedulerHandle<J> {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!("Scrape loop started (interval: {:?})", interval);
            loop {
                if *stop_rx.borrow() {
                    break;
                }

                let status = job.run_cycle().await;
                debug!("Scrape cycle finished: {:?}", status);

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    // A closed channel means the handle is gone, which also stops the loop.
                    _ = stop_rx.changed() => break,
                }
            }
            info!("Scrape loop stopped");
            job
        });

        SchedulerHandle { stop_tx, task }
    }
}

/// Handle to a running scrape loop
pub struct SchedulerHandle<J> {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<J>,
}

impl<J> SchedulerHandle<J> {
    /// Stop the loop and get the job back.
    pub async fn stop(self) -> anyhow::Result<J> {
        // The loop may already have exited; that is not an error.
        let _ = self.stop_tx.send(true);
        Ok(self.task.await?)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
