// src/snapshot/types.rs
//! Typed shapes of the nine daily snapshot documents.
//!
//! Structs are `#[serde(default)]` so a missing key resolves to the documented
//! default below, and every field goes through a [`lenient`](super::lenient)
//! decoder so a wrongly-typed value does too. The three snapshots with
//! alternate list keys use field-level defaults instead, so an absent key
//! reads as `None` rather than the empty list of their `Default`.
//! Where the upstream exporter has used more than one key for the same data
//! (`top_sources` / `sources`, `headline` / `title`, ...) both keys are kept
//! as separate fields and an accessor picks the first one present.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Current UTC date as `YYYY-MM-DD`, used for default `date` fields.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.trim().is_empty())
}

// ------------------------------------------------------------
// articles
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "US")]
    Us,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "lenient::string")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub sentiment: Option<Sentiment>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub country: Option<Country>,
    #[serde(deserialize_with = "lenient::string")]
    pub topic: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub display_topic: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub viral_score: f64,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

impl Article {
    /// `url`, falling back to the older `link` key.
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url).or_else(|| non_empty(&self.link))
    }

    /// Publication time, falling back to when the exporter fetched it.
    pub fn timestamp(&self) -> Option<&str> {
        non_empty(&self.published_date).or_else(|| non_empty(&self.fetched_at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlesSnapshot {
    #[serde(deserialize_with = "lenient::vec_of")]
    pub articles: Vec<Article>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_articles: u64,
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Default for ArticlesSnapshot {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            total_articles: 0,
            date: Some(today()),
            updated_at: None,
        }
    }
}

// ------------------------------------------------------------
// sentiment_tracker
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentTracker {
    #[serde(deserialize_with = "lenient::numbers")]
    pub mood_scores: Vec<f64>,
    #[serde(deserialize_with = "lenient::vec_of")]
    pub dates: Vec<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub days: u64,
}

impl Default for SentimentTracker {
    fn default() -> Self {
        Self {
            mood_scores: vec![50.0],
            dates: Vec::new(),
            days: 1,
        }
    }
}

// ------------------------------------------------------------
// topic_surges
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSurge {
    #[serde(deserialize_with = "lenient::string")]
    pub topic: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub change_pct: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub today: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub yesterday: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSurges {
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::vec_of")]
    pub surges: Vec<TopicSurge>,
}

impl Default for TopicSurges {
    fn default() -> Self {
        Self {
            date: Some(today()),
            surges: Vec::new(),
        }
    }
}

// ------------------------------------------------------------
// category_dominance
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryEntry {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub articles: Option<f64>,
}

impl CategoryEntry {
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.name).or_else(|| non_empty(&self.category))
    }

    pub fn amount(&self) -> f64 {
        self.value.or(self.count).or(self.articles).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDominance {
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub dominant_category: String,
    #[serde(deserialize_with = "lenient::vec_of")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for CategoryDominance {
    fn default() -> Self {
        Self {
            date: Some(today()),
            dominant_category: "Unknown".to_string(),
            categories: Vec::new(),
        }
    }
}

// ------------------------------------------------------------
// wordcloud
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keyword {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub value: f64,
}

impl Keyword {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wordcloud {
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::vec_of")]
    pub keywords: Vec<Keyword>,
}

impl Default for Wordcloud {
    fn default() -> Self {
        Self {
            date: Some(today()),
            keywords: Vec::new(),
        }
    }
}

// ------------------------------------------------------------
// source_productivity
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCount {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub count: f64,
}

impl SourceCount {
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.source).or_else(|| non_empty(&self.name))
    }
}

// Field-level defaults only: the `Default` impl is the empty snapshot, while
// a parsed document must keep an absent key as `None` so the alternate key
// can be reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProductivity {
    #[serde(default, deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub top_sources: Option<Vec<SourceCount>>,
    #[serde(default, deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceCount>>,
}

impl Default for SourceProductivity {
    fn default() -> Self {
        Self {
            top_sources: None,
            sources: Some(Vec::new()),
        }
    }
}

impl SourceProductivity {
    /// `top_sources` when present, else `sources`.
    pub fn entries(&self) -> &[SourceCount] {
        self.top_sources
            .as_deref()
            .or(self.sources.as_deref())
            .unwrap_or_default()
    }
}

// ------------------------------------------------------------
// outlet_sentiment
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutletMood {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub mood_score: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
}

impl OutletMood {
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.source)
            .or_else(|| non_empty(&self.outlet))
            .or_else(|| non_empty(&self.name))
    }

    pub fn score(&self) -> f64 {
        self.mood_score
            .or(self.sentiment_score)
            .or(self.sentiment)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletSentiment {
    #[serde(default, deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub top_10: Option<Vec<OutletMood>>,
    #[serde(default, deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub outlets: Option<Vec<OutletMood>>,
}

impl Default for OutletSentiment {
    fn default() -> Self {
        Self {
            top_10: None,
            outlets: Some(Vec::new()),
        }
    }
}

impl OutletSentiment {
    /// `top_10` when present, else `outlets`.
    pub fn entries(&self) -> &[OutletMood] {
        self.top_10
            .as_deref()
            .or(self.outlets.as_deref())
            .unwrap_or_default()
    }
}

// ------------------------------------------------------------
// publishing_rhythm
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyBucket {
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub articles: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub count: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishingRhythm {
    #[serde(default, deserialize_with = "lenient::opt_numbers", skip_serializing_if = "Option::is_none")]
    pub hourly_counts: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Vec<HourlyBucket>>,
}

impl Default for PublishingRhythm {
    fn default() -> Self {
        Self {
            hourly_counts: Some(Vec::new()),
            hourly: None,
        }
    }
}

impl PublishingRhythm {
    /// Per-hour counts from `hourly_counts`, else from `hourly[].articles|count`.
    pub fn counts(&self) -> Vec<f64> {
        if let Some(counts) = &self.hourly_counts {
            return counts.clone();
        }
        self.hourly
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|h| h.articles.or(h.count).unwrap_or(0.0))
            .collect()
    }
}

// ------------------------------------------------------------
// cross_source_stories
// ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub outlets: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::opt_vec_of", skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl Story {
    pub fn label(&self) -> Option<&str> {
        non_empty(&self.headline).or_else(|| non_empty(&self.title))
    }

    pub fn outlet_list(&self) -> Option<&[String]> {
        self.outlets.as_deref().or(self.sources.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSourceStories {
    #[serde(deserialize_with = "lenient::vec_of")]
    pub stories: Vec<Story>,
}
