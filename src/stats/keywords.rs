// src/stats/keywords.rs
//! Keyword ranking for the word cloud.
//!
//! Content-quality policy: a keyword is shown only if its name is longer than
//! three characters, its lowercased name is not a stop word, and its value is
//! non-zero. Survivors are ranked by descending value; equal values keep the
//! exporter's order.

use std::collections::HashSet;

use crate::snapshot::{Keyword, Wordcloud};

const HTML_ARTIFACTS: &[&str] = &["href", "https", "http", "apos", "quot", "nbsp", "amp", "lt", "gt"];

const PRONOUNS: &[&str] = &[
    "the", "a", "an", "i", "me", "we", "he", "she", "it", "they", "you", "him", "her", "them",
    "his", "hers", "our", "ours", "their", "theirs",
];

const CONNECTIVES: &[&str] = &[
    "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from", "that", "this",
    "as", "about", "is", "are", "was", "were",
];

const COMMON_VERBS: &[&str] = &[
    "be", "have", "has", "do", "does", "did", "will", "would", "could", "should", "may", "can",
];

const COMMON_WORDS: &[&str] = &[
    "said", "say", "says", "like", "go", "just", "now", "more", "also", "very", "some", "which",
    "get", "been",
];

/// Case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        let mut words: HashSet<String> = [HTML_ARTIFACTS, PRONOUNS, CONNECTIVES, COMMON_VERBS, COMMON_WORDS]
            .iter()
            .flat_map(|list| list.iter())
            .map(|w| w.to_string())
            .collect();
        words.extend(('a'..='z').map(String::from));
        words.extend(('0'..='9').map(String::from));
        Self { words }
    }
}

impl StopWords {
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Add more words (trimmed, lowercased; blanks ignored).
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Top `n` keywords after the content-quality filter.
pub fn keywords(cloud: &Wordcloud, n: usize, stop_words: &StopWords) -> Vec<Keyword> {
    let mut kept: Vec<Keyword> = cloud
        .keywords
        .iter()
        .filter(|k| is_displayable(k, stop_words))
        .cloned()
        .collect();
    kept.sort_by(|a, b| b.value.total_cmp(&a.value));
    kept.truncate(n);
    kept
}

fn is_displayable(k: &Keyword, stop_words: &StopWords) -> bool {
    k.value != 0.0
        && k.value.is_finite()
        && k.name.chars().count() > 3
        && !stop_words.contains(&k.name)
}
