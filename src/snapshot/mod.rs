// src/snapshot/mod.rs
pub mod lenient;
pub mod types;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use types::*;

/// The fixed set of daily export documents, in bundle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Articles,
    SentimentTracker,
    TopicSurges,
    CategoryDominance,
    Wordcloud,
    SourceProductivity,
    OutletSentiment,
    PublishingRhythm,
    CrossSourceStories,
}

impl Resource {
    pub const COUNT: usize = 9;

    pub const ALL: [Resource; Resource::COUNT] = [
        Resource::Articles,
        Resource::SentimentTracker,
        Resource::TopicSurges,
        Resource::CategoryDominance,
        Resource::Wordcloud,
        Resource::SourceProductivity,
        Resource::OutletSentiment,
        Resource::PublishingRhythm,
        Resource::CrossSourceStories,
    ];

    /// Logical name, also the file stem under the data base path.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::SentimentTracker => "sentiment_tracker",
            Resource::TopicSurges => "topic_surges",
            Resource::CategoryDominance => "category_dominance",
            Resource::Wordcloud => "wordcloud",
            Resource::SourceProductivity => "source_productivity",
            Resource::OutletSentiment => "outlet_sentiment",
            Resource::PublishingRhythm => "publishing_rhythm",
            Resource::CrossSourceStories => "cross_source_stories",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    /// Position in [`Resource::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stem = s.trim().trim_end_matches(".json");
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == stem)
            .ok_or_else(|| format!("unknown resource '{s}'"))
    }
}

/// One parsed snapshot document, tagged by the resource it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Articles(ArticlesSnapshot),
    SentimentTracker(SentimentTracker),
    TopicSurges(TopicSurges),
    CategoryDominance(CategoryDominance),
    Wordcloud(Wordcloud),
    SourceProductivity(SourceProductivity),
    OutletSentiment(OutletSentiment),
    PublishingRhythm(PublishingRhythm),
    CrossSourceStories(CrossSourceStories),
}

impl Snapshot {
    /// The resource's documented empty default.
    pub fn empty(resource: Resource) -> Self {
        match resource {
            Resource::Articles => Snapshot::Articles(Default::default()),
            Resource::SentimentTracker => Snapshot::SentimentTracker(Default::default()),
            Resource::TopicSurges => Snapshot::TopicSurges(Default::default()),
            Resource::CategoryDominance => Snapshot::CategoryDominance(Default::default()),
            Resource::Wordcloud => Snapshot::Wordcloud(Default::default()),
            Resource::SourceProductivity => Snapshot::SourceProductivity(Default::default()),
            Resource::OutletSentiment => Snapshot::OutletSentiment(Default::default()),
            Resource::PublishingRhythm => Snapshot::PublishingRhythm(Default::default()),
            Resource::CrossSourceStories => Snapshot::CrossSourceStories(Default::default()),
        }
    }

    /// Parse raw bytes as the given resource. Only invalid JSON fails; shape
    /// problems inside the document resolve to defaults.
    pub fn parse(resource: Resource, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match resource {
            Resource::Articles => Snapshot::Articles(serde_json::from_slice(bytes)?),
            Resource::SentimentTracker => Snapshot::SentimentTracker(serde_json::from_slice(bytes)?),
            Resource::TopicSurges => Snapshot::TopicSurges(serde_json::from_slice(bytes)?),
            Resource::CategoryDominance => {
                Snapshot::CategoryDominance(serde_json::from_slice(bytes)?)
            }
            Resource::Wordcloud => Snapshot::Wordcloud(serde_json::from_slice(bytes)?),
            Resource::SourceProductivity => {
                Snapshot::SourceProductivity(serde_json::from_slice(bytes)?)
            }
            Resource::OutletSentiment => Snapshot::OutletSentiment(serde_json::from_slice(bytes)?),
            Resource::PublishingRhythm => Snapshot::PublishingRhythm(serde_json::from_slice(bytes)?),
            Resource::CrossSourceStories => {
                Snapshot::CrossSourceStories(serde_json::from_slice(bytes)?)
            }
        })
    }

    pub fn resource(&self) -> Resource {
        match self {
            Snapshot::Articles(_) => Resource::Articles,
            Snapshot::SentimentTracker(_) => Resource::SentimentTracker,
            Snapshot::TopicSurges(_) => Resource::TopicSurges,
            Snapshot::CategoryDominance(_) => Resource::CategoryDominance,
            Snapshot::Wordcloud(_) => Resource::Wordcloud,
            Snapshot::SourceProductivity(_) => Resource::SourceProductivity,
            Snapshot::OutletSentiment(_) => Resource::OutletSentiment,
            Snapshot::PublishingRhythm(_) => Resource::PublishingRhythm,
            Snapshot::CrossSourceStories(_) => Resource::CrossSourceStories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_bundle_order() {
        for (i, r) in Resource::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
    }

    #[test]
    fn resource_names_round_trip_through_from_str() {
        assert_eq!("wordcloud".parse::<Resource>(), Ok(Resource::Wordcloud));
        assert_eq!(
            "topic_surges.json".parse::<Resource>(),
            Ok(Resource::TopicSurges)
        );
        assert!("weather".parse::<Resource>().is_err());
    }

    #[test]
    fn parse_rejects_only_invalid_json() {
        assert!(Snapshot::parse(Resource::Wordcloud, b"{not json").is_err());
        let ok = Snapshot::parse(Resource::Wordcloud, br#"{"keywords": 5}"#).unwrap();
        assert_eq!(ok.resource(), Resource::Wordcloud);
        match ok {
            Snapshot::Wordcloud(w) => assert!(w.keywords.is_empty()),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn empty_sentiment_tracker_has_neutral_mood() {
        match Snapshot::empty(Resource::SentimentTracker) {
            Snapshot::SentimentTracker(s) => assert_eq!(s.mood_scores, vec![50.0]),
            other => panic!("unexpected snapshot {other:?}"),
        }
    }
}
