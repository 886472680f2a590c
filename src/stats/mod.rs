//! # Statistics Engine
//! Pure, total functions over an [`AggregateBundle`]: no I/O, no mutation,
//! deterministic for a given bundle. Absent or malformed data reads as zero
//! or empty, never as an error.
//!
//! Policy notes:
//! - Sentiment percentages are rounded independently to whole numbers, so
//!   they can sum to 99, 100 or 101.
//! - An article whose sentiment is missing or unrecognised counts as neutral,
//!   which keeps `positive + neutral + negative == total`.
//! - Dominant topic tie-break is first-seen-wins: a later topic only takes
//!   the lead with a strictly greater count.

pub mod breakdown;
pub mod format;
pub mod keywords;
pub mod trend;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::loader::AggregateBundle;
use crate::snapshot::{Article, Country, Sentiment};

pub use breakdown::{
    category_breakdown, cross_source_coverage, dominant_category, outlet_moods,
    publishing_rhythm, source_ranking, CategoryShare, Coverage, NamedValue, RhythmSummary,
    StoryCoverage,
};
pub use format::{format_date, parse_timestamp, time_ago};
pub use keywords::{keywords, StopWords};
pub use trend::{mood_label, sentiment_trend, top_topics, top_topics_by, Direction, SentimentTrend};

/// Label used for the dominant topic when there is nothing to count.
pub const UNKNOWN_TOPIC: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_articles: usize,
    pub uk_articles: usize,
    pub us_articles: usize,
    pub positive_count: usize,
    pub neutral_count: usize,
    pub negative_count: usize,
    pub positive_pct: u32,
    pub neutral_pct: u32,
    pub negative_pct: u32,
    pub top_topic: String,
    pub topic_share: f64,
    pub total_sources: usize,
    pub unique_sources: Vec<String>,
}

impl Statistics {
    /// All-zero statistics with an unknown dominant topic.
    pub fn empty() -> Self {
        Self {
            total_articles: 0,
            uk_articles: 0,
            us_articles: 0,
            positive_count: 0,
            neutral_count: 0,
            negative_count: 0,
            positive_pct: 0,
            neutral_pct: 0,
            negative_pct: 0,
            top_topic: UNKNOWN_TOPIC.to_string(),
            topic_share: 0.0,
            total_sources: 0,
            unique_sources: Vec::new(),
        }
    }

    pub fn from_articles(articles: &[Article]) -> Self {
        let total = articles.len();
        if total == 0 {
            return Self::empty();
        }

        let (mut positive, mut neutral, mut negative) = (0usize, 0usize, 0usize);
        let (mut uk, mut us) = (0usize, 0usize);
        let mut topics = Tally::default();
        let mut sources = BTreeSet::new();

        for a in articles {
            match a.sentiment {
                Some(Sentiment::Positive) => positive += 1,
                Some(Sentiment::Negative) => negative += 1,
                _ => neutral += 1,
            }
            match a.country {
                Some(Country::Uk) => uk += 1,
                Some(Country::Us) => us += 1,
                _ => {}
            }
            topics.add(topic_key(a));
            if let Some(src) = a.source.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                sources.insert(src.to_string());
            }
        }

        let (top_topic, top_count) = topics
            .leader()
            .map(|(t, c)| (t.to_string(), c))
            .unwrap_or_else(|| (UNKNOWN_TOPIC.to_string(), 0));

        let unique_sources: Vec<String> = sources.into_iter().collect();
        Self {
            total_articles: total,
            uk_articles: uk,
            us_articles: us,
            positive_count: positive,
            neutral_count: neutral,
            negative_count: negative,
            positive_pct: whole_pct(positive, total),
            neutral_pct: whole_pct(neutral, total),
            negative_pct: whole_pct(negative, total),
            top_topic,
            topic_share: one_decimal_pct(top_count as f64, total as f64),
            total_sources: unique_sources.len(),
            unique_sources,
        }
    }
}

pub fn calculate_statistics(bundle: &AggregateBundle) -> Statistics {
    Statistics::from_articles(&bundle.articles.articles)
}

/// Grouping key for topic counts: `display_topic` stands in for the generic
/// "Other" bucket when the exporter provided one.
pub fn topic_key(a: &Article) -> &str {
    match a.topic.as_deref().map(str::trim) {
        Some("Other") => a
            .display_topic
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Other"),
        Some(t) if !t.is_empty() => t,
        _ => "Other",
    }
}

/// Most frequent non-empty `source` among the articles. Ties go to the
/// source seen first; `None` without any sourced article.
pub fn top_source(articles: &[Article]) -> Option<String> {
    let mut tally = Tally::default();
    for a in articles {
        if let Some(src) = a.source.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            tally.add(src);
        }
    }
    tally.leader().map(|(src, _)| src.to_string())
}

/// First `n` articles in upstream order (the live feed).
pub fn top_articles(bundle: &AggregateBundle, n: usize) -> &[Article] {
    let articles = &bundle.articles.articles;
    &articles[..n.min(articles.len())]
}

/// Mean viral score rounded to one decimal; `None` without articles.
pub fn average_viral_score(articles: &[Article]) -> Option<f64> {
    if articles.is_empty() {
        return None;
    }
    let sum: f64 = articles.iter().map(|a| a.viral_score.max(0.0)).sum();
    Some(round1(sum / articles.len() as f64))
}

/// Insertion-ordered counter so the leader fold is deterministic.
#[derive(Default)]
struct Tally<'a> {
    order: Vec<(&'a str, usize)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(key, self.order.len());
                self.order.push((key, 1));
            }
        }
    }

    fn leader(&self) -> Option<(&'a str, usize)> {
        self.order.iter().fold(None, |best, &(topic, count)| match best {
            Some((_, lead)) if lead >= count => best,
            _ => Some((topic, count)),
        })
    }
}

fn whole_pct(count: usize, total: usize) -> u32 {
    ((count as f64 / total as f64) * 100.0).round() as u32
}

pub(crate) fn one_decimal_pct(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    round1(part / whole * 100.0)
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
