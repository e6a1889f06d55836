//! Client module for talking to the tourism data provider
//!
//! This module contains the layers every upstream call passes through:
//! - HTTP fetching with bounded retry and backoff
//! - Envelope decoding and single-vs-array normalization
//! - Per-endpoint parameter shaping and empty-result policy

pub mod envelope;
pub mod fetcher;
pub mod params;
mod endpoints;

pub use endpoints::TourClient;
pub use envelope::{parse, to_array, OneOrMany, ProviderEnvelope};
pub use fetcher::{backoff_delay, build_http_client, Fetcher, Sleeper, TokioSleeper};
pub use params::{Arrange, AreaListQuery, KeywordQuery, Operation, QueryParams};

use crate::models::{
    AreaCode, ListResult, PetTourInfo, TourDetail, TourImage, TourIntro, TourItem,
};
use crate::Result;
use async_trait::async_trait;

/// The provider's content operations
///
/// `TourClient` is the network implementation; aggregation and
/// recommendation code is written against this trait so that it can run
/// over any source of the same data.
#[async_trait]
pub trait TourApi: Send + Sync {
    /// Region codes, or sub-region codes under `parent`
    async fn area_codes(&self, parent: Option<&str>) -> Result<Vec<AreaCode>>;

    /// One page of items filtered by region/category
    async fn area_based_list(&self, query: &AreaListQuery) -> Result<ListResult<TourItem>>;

    /// One page of items matching a keyword
    async fn search_keyword(&self, query: &KeywordQuery) -> Result<ListResult<TourItem>>;

    /// The common detail record; `NotFound` when the provider has none
    async fn detail_common(&self, content_id: &str) -> Result<TourDetail>;

    /// Category-specific detail; `None` when the provider has none
    async fn detail_intro(&self, content_id: &str, content_type_id: &str)
        -> Result<Option<TourIntro>>;

    /// Image gallery; empty when the provider has none
    async fn detail_images(&self, content_id: &str) -> Result<Vec<TourImage>>;

    /// Companion-animal policy; `None` when the provider has none
    async fn detail_pet_tour(&self, content_id: &str) -> Result<Option<PetTourInfo>>;
}
