//! Derived statistics and recommendation results
//!
//! None of these are fetched directly: each is assembled from many
//! independent upstream queries.

use crate::models::TourItem;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Item count for one administrative region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionStat {
    pub code: String,
    pub name: String,
    pub count: u64,
}

/// Item count and share for one content category
///
/// `percentage` is relative to the batch it was computed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category_id: String,
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// Headline numbers for a dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Sum of all category counts
    pub total_count: u64,

    /// Up to three regions, most items first
    pub top_regions: Vec<RegionStat>,

    /// Up to three categories, most items first
    pub top_types: Vec<CategoryStat>,

    pub last_updated: DateTime<Utc>,
}

/// Up to six related items, unique by content id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<TourItem>);

impl RecommendationSet {
    /// Maximum number of recommendations
    pub const LIMIT: usize = 6;

    pub(crate) fn from_items(items: Vec<TourItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[TourItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn content_ids(&self) -> Vec<&str> {
        self.0.iter().map(|item| item.content_id.as_str()).collect()
    }
}
