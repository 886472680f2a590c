// src/stats/breakdown.rs
//! Normalized views over the secondary snapshots (categories, outlets,
//! publishing rhythm, cross-source stories). Each one honours the field
//! alternates of its snapshot and fills a readable label when a name is
//! missing.

use serde::Serialize;

use super::one_decimal_pct;
use crate::snapshot::{CategoryDominance, CrossSourceStories, OutletSentiment, PublishingRhythm, SourceProductivity};

const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
    /// Percent of the summed category values, one decimal.
    pub share: f64,
}

pub fn category_breakdown(c: &CategoryDominance) -> Vec<CategoryShare> {
    let total: f64 = c.categories.iter().map(|e| e.amount().max(0.0)).sum();
    c.categories
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let value = e.amount().max(0.0);
            CategoryShare {
                name: e
                    .label()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Category {}", i + 1)),
                value,
                share: one_decimal_pct(value, total),
            }
        })
        .collect()
}

/// The exporter's dominant category, else the first listed one.
pub fn dominant_category(c: &CategoryDominance) -> String {
    let declared = c.dominant_category.trim();
    if !declared.is_empty() && declared != UNKNOWN_CATEGORY {
        return declared.to_string();
    }
    c.categories
        .iter()
        .find_map(|e| e.label())
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

pub fn source_ranking(p: &SourceProductivity, n: usize) -> Vec<NamedValue> {
    p.entries()
        .iter()
        .take(n)
        .map(|s| NamedValue {
            name: s.label().unwrap_or("Outlet").to_string(),
            value: s.count,
        })
        .collect()
}

pub fn outlet_moods(o: &OutletSentiment) -> Vec<NamedValue> {
    o.entries()
        .iter()
        .map(|m| NamedValue {
            name: m.label().unwrap_or("Outlet").to_string(),
            value: m.score(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmSummary {
    pub hourly: Vec<f64>,
    pub total: f64,
    /// First hour holding the maximum; `None` when there is no activity.
    pub peak_hour: Option<usize>,
}

pub fn publishing_rhythm(r: &PublishingRhythm) -> RhythmSummary {
    let hourly = r.counts();
    let total = hourly.iter().sum();
    let peak_hour = hourly
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (h, &v)| match best {
            Some((_, top)) if top >= v => best,
            _ if v > 0.0 => Some((h, v)),
            _ => best,
        })
        .map(|(h, _)| h);
    RhythmSummary {
        hourly,
        total,
        peak_hour,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Wide,
    Moderate,
    Limited,
}

impl Coverage {
    pub fn for_outlets(count: usize) -> Self {
        match count {
            c if c >= 5 => Coverage::Wide,
            c if c >= 3 => Coverage::Moderate,
            _ => Coverage::Limited,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryCoverage {
    pub headline: String,
    pub outlets: Vec<String>,
    pub outlet_count: usize,
    pub coverage: Coverage,
}

pub fn cross_source_coverage(s: &CrossSourceStories, n: usize) -> Vec<StoryCoverage> {
    s.stories
        .iter()
        .take(n)
        .map(|story| {
            let outlets = story.outlet_list().map(<[String]>::to_vec);
            // a story without an outlet list was still carried by someone
            let outlet_count = outlets.as_ref().map_or(1, Vec::len);
            StoryCoverage {
                headline: story.label().unwrap_or("Untitled Story").to_string(),
                outlets: outlets.unwrap_or_default(),
                outlet_count,
                coverage: Coverage::for_outlets(outlet_count),
            }
        })
        .collect()
}
