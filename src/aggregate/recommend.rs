//! Related-content recommendations
//!
//! Two tiers, best effort: same region and category first, then the same
//! category anywhere. A failed tier counts as empty; the resolver itself
//! never fails.

use crate::client::{AreaListQuery, TourApi};
use crate::models::{RecommendationSet, TourDetail, TourItem};
use std::collections::HashSet;

/// Rows requested per tier
pub const TIER_ROWS: u32 = 10;

/// What recommendations are computed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSubject {
    pub content_id: String,
    pub content_type_id: Option<String>,
    pub area_code: Option<String>,
}

impl From<&TourItem> for RecommendationSubject {
    fn from(item: &TourItem) -> Self {
        Self {
            content_id: item.content_id.clone(),
            content_type_id: item.content_type_id.clone(),
            area_code: item.area_code.clone(),
        }
    }
}

impl From<&TourDetail> for RecommendationSubject {
    fn from(detail: &TourDetail) -> Self {
        Self::from(&detail.item)
    }
}

/// Resolves up to six items related to `subject`
///
/// Never fails: tier errors are logged and treated as empty, so the caller
/// simply hides the section when the set is empty.
pub async fn recommend<A>(api: &A, subject: &RecommendationSubject) -> RecommendationSet
where
    A: TourApi + ?Sized,
{
    let Some(content_type_id) = subject.content_type_id.as_deref() else {
        tracing::debug!(
            "Content {} has no category, skipping recommendations",
            subject.content_id
        );
        return RecommendationSet::default();
    };

    let mut seen: HashSet<String> = HashSet::from([subject.content_id.clone()]);
    let mut picked: Vec<TourItem> = Vec::with_capacity(RecommendationSet::LIMIT);

    if let Some(area_code) = subject.area_code.as_deref() {
        let query = AreaListQuery::new()
            .area(area_code)
            .content_type_id(content_type_id)
            .rows(TIER_ROWS);
        let tier = fetch_tier(api, &query, "region+category").await;
        take_unseen(tier, &mut seen, &mut picked);
    }

    if picked.len() < RecommendationSet::LIMIT {
        let query = AreaListQuery::new()
            .content_type_id(content_type_id)
            .rows(TIER_ROWS);
        let tier = fetch_tier(api, &query, "category").await;
        take_unseen(tier, &mut seen, &mut picked);
    }

    RecommendationSet::from_items(picked)
}

async fn fetch_tier<A>(api: &A, query: &AreaListQuery, tier: &str) -> Vec<TourItem>
where
    A: TourApi + ?Sized,
{
    match api.area_based_list(query).await {
        Ok(result) => result.items,
        Err(e) => {
            tracing::warn!("Recommendation tier '{}' failed: {}", tier, e);
            Vec::new()
        }
    }
}

/// Moves items not yet seen into `picked`, stopping at the limit
fn take_unseen(items: Vec<TourItem>, seen: &mut HashSet<String>, picked: &mut Vec<TourItem>) {
    for item in items {
        if picked.len() >= RecommendationSet::LIMIT {
            break;
        }
        if seen.insert(item.content_id.clone()) {
            picked.push(item);
        }
    }
}
