// tests/refresh.rs
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CountingSource, Reply};
use news_digest::stats::StopWords;
use news_digest::{
    spawn_refresh_loop, AggregateLoader, DashboardService, ReportLimits, Resource, SnapshotCache,
    SnapshotFetcher,
};

fn service(src: &CountingSource, ttl: Duration) -> Arc<DashboardService> {
    let cache = SnapshotCache::new(SnapshotFetcher::from_source(src.clone()), ttl);
    Arc::new(DashboardService::new(
        AggregateLoader::new(Arc::new(cache)),
        StopWords::default(),
        ReportLimits::default(),
    ))
}

#[tokio::test(start_paused = true)]
async fn publishes_immediately_then_every_interval() {
    let src = CountingSource::new();
    // TTL shorter than the interval so each tick refetches
    let svc = service(&src, Duration::from_secs(60));
    let (mut rx, handle) = spawn_refresh_loop(svc, Duration::from_secs(30 * 60));

    rx.changed().await.unwrap();
    let first = rx.borrow_and_update().clone().expect("first report");
    assert_eq!(first.statistics.total_articles, 6);
    assert_eq!(src.calls(Resource::Articles), 1);

    src.set(Resource::Articles, Reply::Status(500));
    rx.changed().await.unwrap();
    let second = rx.borrow_and_update().clone().expect("second report");
    assert!(second.no_data);
    assert_eq!(src.calls(Resource::Articles), 2);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn loop_stops_once_receivers_are_gone() {
    let src = CountingSource::new();
    let svc = service(&src, Duration::from_secs(1));
    let (rx, handle) = spawn_refresh_loop(svc, Duration::from_secs(5));

    drop(rx);
    tokio::time::timeout(Duration::from_secs(60), handle)
        .await
        .expect("refresh loop should exit")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn zero_interval_is_clamped_instead_of_panicking() {
    let src = CountingSource::new();
    let svc = service(&src, Duration::from_secs(300));
    let (mut rx, handle) = spawn_refresh_loop(svc, Duration::ZERO);

    rx.changed().await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_some());

    handle.abort();
    let err = handle.await.unwrap_err();
    assert!(err.is_cancelled(), "loop ended with {err:?}");
}

#[tokio::test]
async fn force_refresh_bypasses_the_cache() {
    let src = CountingSource::new();
    let svc = service(&src, Duration::from_secs(300));

    svc.refresh().await;
    svc.refresh().await;
    assert_eq!(src.total_calls(), Resource::COUNT);

    let report = svc.force_refresh().await;
    assert!(!report.no_data);
    assert_eq!(src.total_calls(), 2 * Resource::COUNT);
}
