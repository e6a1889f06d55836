//! Aggregation over many provider calls
//!
//! This module handles:
//! - Fan-out with wait-for-all, partition-by-outcome semantics
//! - Region and category statistics, and the summary built from them
//! - Two-tier related-content recommendations
//!
//! Nothing here retries; retry and backoff belong to the fetcher. This
//! layer only isolates failures between independent branches.

mod recommend;
pub mod settle;
mod stats;

pub use recommend::{recommend, RecommendationSubject, TIER_ROWS};
pub use settle::{settle_all, Settled};
pub use stats::{category_stats, percentages, region_stats, stats_summary, top_by_count, TOP_N};
