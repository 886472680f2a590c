// src/fetch/mod.rs
//! Snapshot fetching: a [`SnapshotSource`] yields raw bytes for a resource,
//! [`SnapshotFetcher`] parses them and applies the per-resource fallback.

pub mod dir;
pub mod http;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use serde::Serialize;

use crate::snapshot::{Resource, Snapshot};

pub use dir::DirSource;
pub use http::HttpSource;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error for {resource}: {message}")]
    Transport { resource: Resource, message: String },

    #[error("HTTP {status} for {resource}")]
    Status { resource: Resource, status: u16 },

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {resource}: {source}")]
    Malformed {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse failure class, used for metrics labels and the catastrophic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Status,
    Malformed,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::Malformed => "malformed",
        }
    }
}

impl FetchError {
    /// Unreadable local files count as transport failures: the export is
    /// unreachable rather than rejected.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport { .. } | FetchError::Io { .. } => FailureKind::Transport,
            FetchError::Status { .. } => FailureKind::Status,
            FetchError::Malformed { .. } => FailureKind::Malformed,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == FailureKind::Transport
    }
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Raw document bytes for `resource`, bypassing any intermediate cache.
    async fn fetch_bytes(&self, resource: Resource) -> Result<Vec<u8>, FetchError>;
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct SnapshotFetcher {
    source: Arc<dyn SnapshotSource>,
}

impl SnapshotFetcher {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    pub fn from_source<S: SnapshotSource + 'static>(source: S) -> Self {
        Self::new(Arc::new(source))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub async fn try_fetch(&self, resource: Resource) -> Result<Snapshot, FetchError> {
        let bytes = self.source.fetch_bytes(resource).await?;
        Snapshot::parse(resource, &bytes).map_err(|source| FetchError::Malformed { resource, source })
    }

    /// Never fails: any error is logged and replaced by the resource default.
    pub async fn fetch(&self, resource: Resource) -> Snapshot {
        match self.try_fetch(resource).await {
            Ok(snapshot) => {
                tracing::debug!(target: "snapshot", resource = resource.name(), source = self.source.name(), "loaded");
                snapshot
            }
            Err(e) => {
                record_failure(resource, &e);
                Snapshot::empty(resource)
            }
        }
    }
}

pub(crate) fn record_failure(resource: Resource, e: &FetchError) {
    tracing::warn!(
        target: "snapshot",
        resource = resource.name(),
        kind = e.kind().as_str(),
        error = %e,
        "snapshot fetch failed, using empty default"
    );
    counter!(
        "snapshot_fetch_errors_total",
        "resource" => resource.name(),
        "kind" => e.kind().as_str()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<&'static str, u16>);

    #[async_trait]
    impl SnapshotSource for Fixed {
        async fn fetch_bytes(&self, resource: Resource) -> Result<Vec<u8>, FetchError> {
            match self.0 {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(status) => Err(FetchError::Status { resource, status }),
            }
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn fetch_parses_good_documents() {
        let f = SnapshotFetcher::from_source(Fixed(Ok(r#"{"mood_scores":[40,55]}"#)));
        match f.fetch(Resource::SentimentTracker).await {
            Snapshot::SentimentTracker(s) => assert_eq!(s.mood_scores, vec![40.0, 55.0]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_and_malformed_fall_back_to_default() {
        let f = SnapshotFetcher::from_source(Fixed(Err(503)));
        let err = f.try_fetch(Resource::Wordcloud).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Status);
        assert_eq!(
            f.fetch(Resource::Wordcloud).await,
            Snapshot::empty(Resource::Wordcloud)
        );

        let f = SnapshotFetcher::from_source(Fixed(Ok("<html>oops</html>")));
        let err = f.try_fetch(Resource::TopicSurges).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Malformed);
        assert!(!err.is_transport());
    }
}
