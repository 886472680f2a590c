// src/telemetry.rs
use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series carry descriptions once a recorder
/// is installed by the embedding process).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "snapshot_fetch_errors_total",
            "Snapshot fetches replaced by their empty default."
        );
        describe_counter!(
            "snapshot_cache_hits_total",
            "Snapshot reads served from the TTL cache."
        );
        describe_counter!(
            "snapshot_cache_misses_total",
            "Snapshot reads that went to the source."
        );
        describe_counter!("aggregate_loads_total", "Completed aggregate loads.");
        describe_counter!(
            "aggregate_catastrophic_total",
            "Aggregate loads where every resource failed at the transport layer."
        );
        describe_histogram!("aggregate_load_ms", "Aggregate load time in milliseconds.");
        describe_gauge!(
            "aggregate_last_load_ts",
            "Unix ts when the last aggregate load finished."
        );
    });
}
