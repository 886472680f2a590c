// src/stats/trend.rs
use std::cmp::Ordering;

use serde::Serialize;

use crate::snapshot::{SentimentTracker, TopicSurge, TopicSurges};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentTrend {
    pub current: f64,
    pub previous: f64,
    pub trend: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Improving,
    Declining,
    Stable,
}

impl SentimentTrend {
    pub fn direction(&self) -> Direction {
        if self.trend > 0.0 {
            Direction::Improving
        } else if self.trend < 0.0 {
            Direction::Declining
        } else {
            Direction::Stable
        }
    }
}

/// Latest mood score against the one before it. A missing point reads as 0,
/// so a single-point series reports itself as the whole trend.
pub fn sentiment_trend(tracker: &SentimentTracker) -> SentimentTrend {
    let scores = &tracker.mood_scores;
    let current = scores.last().copied().unwrap_or(0.0);
    let previous = scores
        .len()
        .checked_sub(2)
        .map(|i| scores[i])
        .unwrap_or(0.0);
    SentimentTrend {
        current,
        previous,
        trend: current - previous,
    }
}

/// Tone wording for a mood score on the 0–100 scale.
pub fn mood_label(current: f64) -> &'static str {
    if current > 55.0 {
        "largely positive"
    } else if current > 45.0 {
        "mixed"
    } else {
        "cautious"
    }
}

/// First `n` surges in the order the exporter ranked them.
pub fn top_topics(topics: &TopicSurges, n: usize) -> &[TopicSurge] {
    &topics.surges[..n.min(topics.surges.len())]
}

/// First `n` surges under a caller-supplied ordering (stable for ties).
pub fn top_topics_by<F>(topics: &TopicSurges, n: usize, mut cmp: F) -> Vec<TopicSurge>
where
    F: FnMut(&TopicSurge, &TopicSurge) -> Ordering,
{
    let mut sorted = topics.surges.clone();
    sorted.sort_by(|a, b| cmp(a, b));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(scores: &[f64]) -> SentimentTracker {
        SentimentTracker {
            mood_scores: scores.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn two_points_give_delta() {
        let t = sentiment_trend(&tracker(&[40.0, 55.0]));
        assert_eq!(
            t,
            SentimentTrend {
                current: 55.0,
                previous: 40.0,
                trend: 15.0
            }
        );
        assert_eq!(t.direction(), Direction::Improving);
    }

    #[test]
    fn empty_series_is_all_zero() {
        let t = sentiment_trend(&tracker(&[]));
        assert_eq!((t.current, t.previous, t.trend), (0.0, 0.0, 0.0));
        assert_eq!(t.direction(), Direction::Stable);
    }

    #[test]
    fn single_point_has_zero_previous() {
        let t = sentiment_trend(&tracker(&[50.0]));
        assert_eq!((t.current, t.previous, t.trend), (50.0, 0.0, 50.0));
    }

    #[test]
    fn mood_label_bands() {
        assert_eq!(mood_label(56.0), "largely positive");
        assert_eq!(mood_label(55.0), "mixed");
        assert_eq!(mood_label(45.5), "mixed");
        assert_eq!(mood_label(45.0), "cautious");
    }

    #[test]
    fn top_topics_keeps_upstream_order() {
        let topics = TopicSurges {
            date: None,
            surges: ["Budget", "Storm", "Election"]
                .iter()
                .enumerate()
                .map(|(i, t)| TopicSurge {
                    topic: Some(t.to_string()),
                    change_pct: (i as f64) * 10.0,
                    ..Default::default()
                })
                .collect(),
        };
        let top: Vec<_> = top_topics(&topics, 2)
            .iter()
            .map(|s| s.topic.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(top, vec!["Budget", "Storm"]);
        assert_eq!(top_topics(&topics, 10).len(), 3);

        let by_change = top_topics_by(&topics, 1, |a, b| b.change_pct.total_cmp(&a.change_pct));
        assert_eq!(by_change[0].topic.as_deref(), Some("Election"));
    }
}
