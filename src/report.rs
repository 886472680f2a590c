//! # Dashboard report
//! [`DashboardService`] owns the loader chain built from a [`DigestConfig`]
//! and turns each [`AggregateBundle`] into the [`DashboardReport`] the
//! presentation layer renders.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::SnapshotCache;
use crate::config::DigestConfig;
use crate::fetch::{DirSource, HttpSource, SnapshotFetcher};
use crate::loader::{AggregateBundle, AggregateLoader};
use crate::snapshot::{Article, Keyword, TopicSurge};
use crate::stats::{
    average_viral_score, calculate_statistics, category_breakdown, cross_source_coverage,
    dominant_category, format_date, keywords, mood_label, outlet_moods, publishing_rhythm,
    sentiment_trend, source_ranking, time_ago, top_articles, top_source, top_topics, CategoryShare,
    Direction, NamedValue, RhythmSummary, SentimentTrend, Statistics, StopWords, StoryCoverage,
};

/// How many entries each ranked list keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLimits {
    pub topics: usize,
    pub keywords: usize,
    pub articles: usize,
    pub sources: usize,
    pub stories: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            topics: 5,
            keywords: 50,
            articles: 5,
            sources: 10,
            stories: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    #[serde(flatten)]
    pub trend: SentimentTrend,
    pub direction: Direction,
    pub mood: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub date: String,
    pub formatted_date: String,
    /// Relative age of the export (`"12 min ago"`).
    pub updated: String,
    pub no_data: bool,
    pub load_ms: f64,
    pub statistics: Statistics,
    pub sentiment: SentimentSummary,
    pub top_topics: Vec<TopicSurge>,
    pub keywords: Vec<Keyword>,
    pub top_articles: Vec<Article>,
    pub average_viral_score: Option<f64>,
    /// Most frequent article source; `None` renders as a dash.
    pub top_source: Option<String>,
    pub categories: Vec<CategoryShare>,
    pub dominant_category: String,
    pub sources: Vec<NamedValue>,
    pub outlets: Vec<NamedValue>,
    pub rhythm: RhythmSummary,
    pub stories: Vec<StoryCoverage>,
}

impl DashboardReport {
    pub fn build(
        bundle: &AggregateBundle,
        limits: &ReportLimits,
        stop_words: &StopWords,
        now: DateTime<Utc>,
    ) -> Self {
        let statistics = calculate_statistics(bundle);
        let trend = sentiment_trend(&bundle.sentiment);
        let date = bundle.date();
        let updated_at = bundle
            .articles
            .updated_at
            .as_deref()
            .or(bundle.articles.date.as_deref());

        Self {
            formatted_date: format_date(&date),
            updated: time_ago(updated_at, now),
            date,
            no_data: bundle.error || bundle.articles.articles.is_empty(),
            load_ms: bundle.load_ms,
            sentiment: SentimentSummary {
                direction: trend.direction(),
                mood: mood_label(trend.current),
                trend,
            },
            top_topics: top_topics(&bundle.topics, limits.topics).to_vec(),
            keywords: keywords(&bundle.wordcloud, limits.keywords, stop_words),
            top_articles: top_articles(bundle, limits.articles).to_vec(),
            average_viral_score: average_viral_score(&bundle.articles.articles),
            top_source: top_source(&bundle.articles.articles),
            categories: category_breakdown(&bundle.categories),
            dominant_category: dominant_category(&bundle.categories),
            sources: source_ranking(&bundle.sources, limits.sources),
            outlets: outlet_moods(&bundle.outlets),
            rhythm: publishing_rhythm(&bundle.rhythm),
            stories: cross_source_coverage(&bundle.stories, limits.stories),
            statistics,
        }
    }
}

/// Explicitly constructed entry point: one cache, one loader, one set of
/// presentation limits. Share it behind an `Arc`.
pub struct DashboardService {
    loader: AggregateLoader,
    stop_words: StopWords,
    limits: ReportLimits,
}

impl DashboardService {
    pub fn new(loader: AggregateLoader, stop_words: StopWords, limits: ReportLimits) -> Self {
        Self {
            loader,
            stop_words,
            limits,
        }
    }

    /// Build the source, fetcher, cache and loader described by `cfg`.
    pub fn from_config(cfg: &DigestConfig) -> Result<Self> {
        let fetcher = if cfg.is_remote() {
            let http = HttpSource::new(
                cfg.data_base.trim(),
                cfg.connect_timeout(),
                cfg.request_timeout(),
            )
            .with_context(|| format!("building HTTP source for {}", cfg.data_base))?;
            SnapshotFetcher::from_source(http)
        } else {
            SnapshotFetcher::from_source(DirSource::new(cfg.data_base.trim()))
        };
        tracing::info!(
            target: "loader",
            data_base = %cfg.data_base,
            source = fetcher.source_name(),
            ttl_secs = cfg.cache_ttl_secs,
            "dashboard service configured"
        );
        let cache = Arc::new(SnapshotCache::new(fetcher, cfg.cache_ttl()));
        Ok(Self::new(
            AggregateLoader::new(cache),
            cfg.stop_words(),
            cfg.limits(),
        ))
    }

    pub fn loader(&self) -> &AggregateLoader {
        &self.loader
    }

    pub fn limits(&self) -> &ReportLimits {
        &self.limits
    }

    /// One loading cycle through the cache.
    pub async fn load(&self) -> AggregateBundle {
        self.loader.load_all().await
    }

    pub async fn refresh(&self) -> DashboardReport {
        let bundle = self.load().await;
        DashboardReport::build(&bundle, &self.limits, &self.stop_words, Utc::now())
    }

    /// Drop every cached snapshot first, so each resource is refetched.
    pub async fn force_refresh(&self) -> DashboardReport {
        self.loader.cache().clear().await;
        self.refresh().await
    }
}
