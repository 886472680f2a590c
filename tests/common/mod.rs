// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use news_digest::{FetchError, Resource, SnapshotSource};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_bytes(resource: Resource) -> Vec<u8> {
    std::fs::read(fixtures_dir().join(resource.file_name())).expect("fixture")
}

/// What the mock returns for one resource.
#[derive(Clone)]
pub enum Reply {
    Body(Vec<u8>),
    Status(u16),
    Transport,
}

/// In-memory source that serves the fixtures by default, counts calls per
/// resource and can be told to fail or delay individual resources.
#[derive(Clone, Default)]
pub struct CountingSource {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    calls: [AtomicUsize; Resource::COUNT],
    overrides: Mutex<HashMap<Resource, Reply>>,
    delay: Mutex<Option<Duration>>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, resource: Resource, reply: Reply) {
        self.inner.overrides.lock().unwrap().insert(resource, reply);
    }

    pub fn fail_all(&self, reply: Reply) {
        for r in Resource::ALL {
            self.set(r, reply.clone());
        }
    }

    pub fn reset(&self, resource: Resource) {
        self.inner.overrides.lock().unwrap().remove(&resource);
    }

    pub fn with_delay(self, d: Duration) -> Self {
        *self.inner.delay.lock().unwrap() = Some(d);
        self
    }

    pub fn calls(&self, resource: Resource) -> usize {
        self.inner.calls[resource.index()].load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        Resource::ALL.iter().map(|r| self.calls(*r)).sum()
    }
}

#[async_trait]
impl SnapshotSource for CountingSource {
    async fn fetch_bytes(&self, resource: Resource) -> Result<Vec<u8>, FetchError> {
        self.inner.calls[resource.index()].fetch_add(1, Ordering::SeqCst);
        let delay = *self.inner.delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        let reply = self.inner.overrides.lock().unwrap().get(&resource).cloned();
        match reply {
            None => Ok(fixture_bytes(resource)),
            Some(Reply::Body(b)) => Ok(b),
            Some(Reply::Status(status)) => Err(FetchError::Status { resource, status }),
            Some(Reply::Transport) => Err(FetchError::Transport {
                resource,
                message: "connection refused".into(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}
