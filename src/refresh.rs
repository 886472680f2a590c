// src/refresh.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::report::{DashboardReport, DashboardService};

pub type ReportReceiver = watch::Receiver<Option<Arc<DashboardReport>>>;

/// Minimum spacing between refreshes.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the periodic refresh loop. The first refresh runs immediately, then
/// once per `interval` (never less than [`MIN_INTERVAL`]). The loop ends when
/// every receiver is dropped; abort the handle to stop it sooner.
pub fn spawn_refresh_loop(
    service: Arc<DashboardService>,
    interval: Duration,
) -> (ReportReceiver, JoinHandle<()>) {
    let interval = interval.max(MIN_INTERVAL);
    let (tx, rx) = watch::channel(None);
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                tracing::debug!(target: "refresh", "no subscribers left, stopping");
                break;
            }
            let report = service.refresh().await;
            tracing::info!(
                target: "refresh",
                date = %report.date,
                articles = report.statistics.total_articles,
                no_data = report.no_data,
                next_in_secs = interval.as_secs(),
                "dashboard refreshed"
            );
            tx.send_replace(Some(Arc::new(report)));
        }
    });
    (rx, handle)
}
