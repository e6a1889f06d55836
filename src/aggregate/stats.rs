//! Statistics derived from fan-out count queries
//!
//! The provider has no grouped-count operator, so every region and every
//! category costs one `numOfRows=1` listing whose `totalCount` is the answer.
//! Individual branch failures are logged and dropped; the whole call fails
//! only when every branch failed.

use crate::aggregate::settle::settle_all;
use crate::client::{AreaListQuery, TourApi};
use crate::models::{AreaCode, CategoryStat, ContentType, RegionStat, StatsSummary};
use crate::{Result, TourError};
use chrono::Utc;

/// Entries kept in each top list of the summary
pub const TOP_N: usize = 3;

/// Item counts per top-level region
///
/// # Returns
///
/// * `Ok(Vec<RegionStat>)` - One entry per region whose count query succeeded, in provider order
/// * `Err(TourError)` - The region list could not be fetched, or every count query failed
pub async fn region_stats<A>(api: &A) -> Result<Vec<RegionStat>>
where
    A: TourApi + ?Sized,
{
    let regions = api.area_codes(None).await?;
    if regions.is_empty() {
        tracing::warn!("Provider returned no region codes");
        return Ok(Vec::new());
    }

    let settled = settle_all(regions.iter().map(|region| region_count(api, region))).await;

    for (code, error) in &settled.failures {
        tracing::warn!("Dropping region {} from stats: {}", code, error);
    }

    if settled.all_failed() {
        return Err(exhausted("region", settled.attempted(), settled.failures));
    }

    tracing::info!(
        "Region stats: {}/{} regions counted",
        settled.successes.len(),
        settled.attempted()
    );
    Ok(settled.successes)
}

/// Item counts and shares per content category
///
/// # Returns
///
/// * `Ok(Vec<CategoryStat>)` - One entry per category whose count query succeeded, in enumeration order
/// * `Err(TourError::AggregateExhausted)` - Every count query failed
pub async fn category_stats<A>(api: &A) -> Result<Vec<CategoryStat>>
where
    A: TourApi + ?Sized,
{
    let settled = settle_all(
        ContentType::ALL
            .into_iter()
            .map(|content_type| category_count(api, content_type)),
    )
    .await;

    for (code, error) in &settled.failures {
        tracing::warn!("Dropping category {} from stats: {}", code, error);
    }

    if settled.all_failed() {
        return Err(exhausted("category", settled.attempted(), settled.failures));
    }

    let counts: Vec<u64> = settled.successes.iter().map(|(_, count)| *count).collect();
    let percentages = percentages(&counts);

    Ok(settled
        .successes
        .into_iter()
        .zip(percentages)
        .map(|((content_type, count), percentage)| CategoryStat {
            category_id: content_type.id().to_string(),
            name: content_type.name().to_string(),
            count,
            percentage,
        })
        .collect())
}

/// Headline statistics
///
/// Region and category stats run concurrently. `total_count` comes from
/// the category counts, which partition the dataset; region counts are
/// queried independently and need not add up to the same figure.
///
/// Both halves always run to completion. When both fail, the region error
/// is the one reported.
pub async fn stats_summary<A>(api: &A) -> Result<StatsSummary>
where
    A: TourApi + ?Sized,
{
    let (regions, categories) = tokio::join!(region_stats(api), category_stats(api));
    let regions = regions?;
    let categories = categories?;

    let total_count = categories.iter().map(|c| c.count).sum();

    Ok(StatsSummary {
        total_count,
        top_regions: top_by_count(regions, |r| r.count),
        top_types: top_by_count(categories, |c| c.count),
        last_updated: Utc::now(),
    })
}

/// Share of each count in the total, rounded to one decimal place
///
/// All zero when the total is zero.
pub fn percentages(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    counts
        .iter()
        .map(|&count| {
            if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64 * 1000.0).round() / 10.0
            }
        })
        .collect()
}

/// Highest `TOP_N` entries by count, ties kept in input order
pub fn top_by_count<T, F>(mut entries: Vec<T>, count: F) -> Vec<T>
where
    F: Fn(&T) -> u64,
{
    // sort_by is stable
    entries.sort_by(|a, b| count(b).cmp(&count(a)));
    entries.truncate(TOP_N);
    entries
}

async fn region_count<A>(
    api: &A,
    region: &AreaCode,
) -> std::result::Result<RegionStat, (String, TourError)>
where
    A: TourApi + ?Sized,
{
    let query = AreaListQuery::new().area(region.code.as_str()).rows(1);
    match api.area_based_list(&query).await {
        Ok(result) => Ok(RegionStat {
            code: region.code.clone(),
            name: region.name.clone(),
            count: result.total_count,
        }),
        Err(e) => Err((region.code.clone(), e)),
    }
}

async fn category_count<A>(
    api: &A,
    content_type: ContentType,
) -> std::result::Result<(ContentType, u64), (String, TourError)>
where
    A: TourApi + ?Sized,
{
    let query = AreaListQuery::new().content_type(content_type).rows(1);
    match api.area_based_list(&query).await {
        Ok(result) => Ok((content_type, result.total_count)),
        Err(e) => Err((content_type.id().to_string(), e)),
    }
}

fn exhausted(
    scope: &'static str,
    attempted: usize,
    failures: Vec<(String, TourError)>,
) -> TourError {
    let last_error = failures
        .into_iter()
        .last()
        .map(|(_, e)| e.to_string())
        .unwrap_or_default();
    TourError::AggregateExhausted {
        scope,
        attempted,
        last_error,
    }
}
