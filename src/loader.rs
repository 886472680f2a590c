//! # Aggregate Loader
//! Loads every snapshot resource concurrently through the cache and folds the
//! results into one [`AggregateBundle`].
//!
//! A failing resource only affects its own field (it gets the documented
//! empty default). The single top-level failure path is the catastrophic one:
//! when every resource failed at the transport layer the bundle is the
//! all-defaults bundle with `error = true`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::{counter, gauge, histogram};
use serde::Serialize;

use crate::cache::{Origin, SnapshotCache};
use crate::fetch::FailureKind;
use crate::snapshot::{
    today, ArticlesSnapshot, CategoryDominance, CrossSourceStories, OutletSentiment,
    PublishingRhythm, Resource, SentimentTracker, Snapshot, SourceProductivity, TopicSurges,
    Wordcloud,
};
use crate::telemetry::ensure_metrics_described;

/// Everything one loading cycle produced. Built fresh on every load.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateBundle {
    pub articles: ArticlesSnapshot,
    pub sentiment: SentimentTracker,
    pub topics: TopicSurges,
    pub categories: CategoryDominance,
    pub wordcloud: Wordcloud,
    pub sources: SourceProductivity,
    pub outlets: OutletSentiment,
    pub rhythm: PublishingRhythm,
    pub stories: CrossSourceStories,
    pub loaded_at: DateTime<Utc>,
    /// Wall-clock time spent in `load_all`, in milliseconds.
    pub load_ms: f64,
    /// Set only when every resource failed at the transport layer.
    pub error: bool,
}

impl AggregateBundle {
    /// The all-defaults bundle used when nothing could be loaded.
    pub fn empty() -> Self {
        Self {
            articles: Default::default(),
            sentiment: Default::default(),
            topics: Default::default(),
            categories: Default::default(),
            wordcloud: Default::default(),
            sources: Default::default(),
            outlets: Default::default(),
            rhythm: Default::default(),
            stories: Default::default(),
            loaded_at: Utc::now(),
            load_ms: 0.0,
            error: true,
        }
    }

    /// Place a snapshot into the field of its resource.
    pub fn absorb(&mut self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::Articles(s) => self.articles = s,
            Snapshot::SentimentTracker(s) => self.sentiment = s,
            Snapshot::TopicSurges(s) => self.topics = s,
            Snapshot::CategoryDominance(s) => self.categories = s,
            Snapshot::Wordcloud(s) => self.wordcloud = s,
            Snapshot::SourceProductivity(s) => self.sources = s,
            Snapshot::OutletSentiment(s) => self.outlets = s,
            Snapshot::PublishingRhythm(s) => self.rhythm = s,
            Snapshot::CrossSourceStories(s) => self.stories = s,
        }
    }

    /// Declared `total_articles`, or the article list length when absent.
    pub fn total_articles(&self) -> u64 {
        match self.articles.total_articles {
            0 => self.articles.articles.len() as u64,
            n => n,
        }
    }

    /// Export date, or today when the articles snapshot carries none.
    pub fn date(&self) -> String {
        self.articles
            .date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(today)
    }
}

#[derive(Clone)]
pub struct AggregateLoader {
    cache: Arc<SnapshotCache>,
}

impl AggregateLoader {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    pub async fn load_all(&self) -> AggregateBundle {
        ensure_metrics_described();
        let t0 = std::time::Instant::now();

        let outcomes = join_all(Resource::ALL.iter().map(|&r| self.cache.get_outcome(r))).await;

        let catastrophic = outcomes
            .iter()
            .all(|f| f.origin == Origin::Fallback(FailureKind::Transport));
        let (mut fresh, mut cached, mut failed) = (0usize, 0usize, 0usize);

        let mut bundle = AggregateBundle::empty();
        bundle.error = catastrophic;
        for fetched in outcomes {
            match fetched.origin {
                Origin::Fresh => fresh += 1,
                Origin::Cached => cached += 1,
                Origin::Fallback(_) => failed += 1,
            }
            bundle.absorb(fetched.snapshot);
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        bundle.load_ms = ms;
        bundle.loaded_at = Utc::now();

        histogram!("aggregate_load_ms").record(ms);
        counter!("aggregate_loads_total").increment(1);
        gauge!("aggregate_last_load_ts").set(bundle.loaded_at.timestamp() as f64);

        if catastrophic {
            counter!("aggregate_catastrophic_total").increment(1);
            tracing::error!(
                target: "loader",
                source = self.cache.fetcher().source_name(),
                "every snapshot failed at the transport layer; serving empty bundle"
            );
        } else {
            tracing::info!(
                target: "loader",
                fresh,
                cached,
                failed,
                articles = bundle.articles.articles.len(),
                load_ms = ms.round() as u64,
                "all snapshots loaded"
            );
        }

        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_articles_falls_back_to_list_length() {
        let mut b = AggregateBundle::empty();
        b.articles = serde_json::from_value(serde_json::json!({
            "articles": [{"headline": "a"}, {"headline": "b"}]
        }))
        .unwrap();
        assert_eq!(b.total_articles(), 2);
        b.articles.total_articles = 250;
        assert_eq!(b.total_articles(), 250);
    }

    #[test]
    fn absorb_routes_by_resource() {
        let mut b = AggregateBundle::empty();
        let snap = Snapshot::parse(Resource::SentimentTracker, br#"{"mood_scores":[1,2,3]}"#).unwrap();
        b.absorb(snap);
        assert_eq!(b.sentiment.mood_scores, vec![1.0, 2.0, 3.0]);
        assert_eq!(b.wordcloud, Wordcloud::default());
    }
}
