// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod refresh;
pub mod report;
pub mod snapshot;
pub mod stats;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::cache::SnapshotCache;
pub use crate::config::DigestConfig;
pub use crate::fetch::{DirSource, FetchError, HttpSource, SnapshotFetcher, SnapshotSource};
pub use crate::loader::{AggregateBundle, AggregateLoader};
pub use crate::refresh::spawn_refresh_loop;
pub use crate::report::{DashboardReport, DashboardService, ReportLimits};
pub use crate::snapshot::{Resource, Snapshot};
pub use crate::stats::{calculate_statistics, Statistics};
