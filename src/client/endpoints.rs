//! Endpoint client
//!
//! One method per provider operation. Every call shares the same request
//! path (identity parameters, fetch, status check, envelope decoding), but
//! each endpoint decides for itself what a missing item means: a hard
//! `NotFound` for the mandatory detail record, an empty result for listings
//! and optional panels.

use crate::client::envelope::{self, ProviderEnvelope};
use crate::client::fetcher::{build_http_client, redact, Fetcher};
use crate::client::params::{
    validate_content_id, AreaListQuery, KeywordQuery, Operation, QueryParams,
};
use crate::client::TourApi;
use crate::config::{validate, ClientConfig};
use crate::models::{
    AreaCode, ListResult, PetTourInfo, TourDetail, TourImage, TourIntro, TourItem,
};
use crate::{Result, TourError};
use async_trait::async_trait;
use std::sync::Arc;
use url::{form_urlencoded, Url};

/// Region codes fit in one page; the provider has fewer than twenty
const AREA_CODE_ROWS: u32 = 100;

/// Images fetched per detail page
const IMAGE_ROWS: u32 = 50;

/// Client for the provider's content endpoints
#[derive(Debug, Clone)]
pub struct TourClient {
    config: Arc<ClientConfig>,
    fetcher: Fetcher,
}

impl TourClient {
    /// Creates a client from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TourClient)` - Ready to issue requests
    /// * `Err(TourError::Config)` - Configuration failed validation
    /// * `Err(TourError::Http)` - HTTP client could not be built
    pub fn new(config: ClientConfig) -> Result<Self> {
        validate(&config)?;
        let client = build_http_client(&config)?;
        let fetcher = Fetcher::new(client, config.retry);
        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    /// Creates a client with the credential taken from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(crate::config::config_from_env()?)
    }

    /// Creates a client around a caller-built fetcher
    pub fn with_fetcher(config: ClientConfig, fetcher: Fetcher) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the full request URL for an operation
    ///
    /// Identity parameters come first, then the endpoint's own parameters.
    pub fn operation_url(&self, operation: Operation, params: &QueryParams) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, operation.path()))?;

        let identity = QueryParams::new()
            .set("serviceKey", decoded_key(self.config.service_key.expose()))
            .set("MobileOS", self.config.mobile_os.as_str())
            .set("MobileApp", self.config.mobile_app.as_str())
            .set("_type", "json");

        url.query_pairs_mut()
            .extend_pairs(identity.pairs())
            .extend_pairs(params.pairs());
        Ok(url)
    }

    /// Fetches an operation and decodes its envelope
    async fn request(&self, operation: Operation, params: QueryParams) -> Result<ProviderEnvelope> {
        let url = self.operation_url(operation, &params)?;
        tracing::debug!("GET {}", redact(&url));

        let response = self.fetcher.fetch(&url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TourError::Status {
                status: status.as_u16(),
                url: redact(&url),
            });
        }

        let bytes = response.bytes().await?;
        ProviderEnvelope::from_slice(&bytes)
    }

    async fn list(
        &self,
        operation: Operation,
        params: QueryParams,
        (page_no, num_of_rows): (u32, u32),
    ) -> Result<ListResult<TourItem>> {
        let envelope = self.request(operation, params).await?;

        let items = match envelope::parse::<TourItem>(&envelope) {
            Ok(parsed) => envelope::to_array(parsed),
            Err(TourError::MissingData) => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(ListResult {
            total_count: envelope.total_count().unwrap_or(items.len() as u64),
            page_no: envelope
                .page_no()
                .and_then(|p| u32::try_from(p).ok())
                .unwrap_or(page_no),
            num_of_rows: envelope
                .num_of_rows()
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(num_of_rows),
            items,
        })
    }
}

#[async_trait]
impl TourApi for TourClient {
    async fn area_codes(&self, parent: Option<&str>) -> Result<Vec<AreaCode>> {
        let params = QueryParams::new()
            .set("pageNo", "1")
            .set("numOfRows", AREA_CODE_ROWS.to_string())
            .opt("areaCode", parent);
        let envelope = self.request(Operation::AreaCode, params).await?;

        match envelope::parse::<AreaCode>(&envelope) {
            Ok(parsed) => Ok(envelope::to_array(parsed)),
            Err(TourError::MissingData) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn area_based_list(&self, query: &AreaListQuery) -> Result<ListResult<TourItem>> {
        let params = query.to_params()?;
        self.list(Operation::AreaBasedList, params, query.paging()).await
    }

    async fn search_keyword(&self, query: &KeywordQuery) -> Result<ListResult<TourItem>> {
        let params = query.to_params()?;
        self.list(Operation::SearchKeyword, params, query.paging()).await
    }

    async fn detail_common(&self, content_id: &str) -> Result<TourDetail> {
        let content_id = validate_content_id(content_id)?;
        let params = QueryParams::new()
            .set("contentId", content_id)
            .set("defaultYN", "Y")
            .set("firstImageYN", "Y")
            .set("areacodeYN", "Y")
            .set("catcodeYN", "Y")
            .set("addrinfoYN", "Y")
            .set("mapinfoYN", "Y")
            .set("overviewYN", "Y");
        let envelope = self.request(Operation::DetailCommon, params).await?;

        let detail = match envelope::parse::<TourDetail>(&envelope) {
            Ok(parsed) => envelope::to_array(parsed).into_iter().next(),
            Err(TourError::MissingData) => None,
            Err(e) => return Err(e),
        };

        detail.ok_or_else(|| TourError::NotFound {
            content_id: content_id.to_string(),
            status: 404,
        })
    }

    async fn detail_intro(
        &self,
        content_id: &str,
        content_type_id: &str,
    ) -> Result<Option<TourIntro>> {
        let content_id = validate_content_id(content_id)?;
        let content_type_id = validate_content_id(content_type_id).map_err(|_| {
            TourError::InvalidParameter(format!(
                "content type id must be numeric, got '{}'",
                content_type_id
            ))
        })?;
        let params = QueryParams::new()
            .set("contentId", content_id)
            .set("contentTypeId", content_type_id);
        let envelope = self.request(Operation::DetailIntro, params).await?;

        match envelope::parse::<TourIntro>(&envelope) {
            Ok(parsed) => Ok(envelope::to_array(parsed).into_iter().next()),
            Err(TourError::MissingData) => {
                tracing::debug!("No intro for content {}", content_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn detail_images(&self, content_id: &str) -> Result<Vec<TourImage>> {
        let content_id = validate_content_id(content_id)?;
        let params = QueryParams::new()
            .set("contentId", content_id)
            .set("imageYN", "Y")
            .set("subImageYN", "Y")
            .set("numOfRows", IMAGE_ROWS.to_string());

        let envelope = match self.request(Operation::DetailImage, params).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found_status() => {
                tracing::debug!("Images for content {} answered 404", content_id);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match envelope::parse::<TourImage>(&envelope) {
            Ok(parsed) => Ok(envelope::to_array(parsed)),
            Err(TourError::MissingData) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn detail_pet_tour(&self, content_id: &str) -> Result<Option<PetTourInfo>> {
        let content_id = validate_content_id(content_id)?;
        let params = QueryParams::new().set("contentId", content_id);

        let envelope = match self.request(Operation::DetailPetTour, params).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found_status() => {
                tracing::debug!("Pet info for content {} answered 404", content_id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match envelope::parse::<PetTourInfo>(&envelope) {
            Ok(parsed) => Ok(envelope::to_array(parsed)
                .into_iter()
                .next()
                .filter(|info| !info.is_empty())),
            Err(TourError::MissingData) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Undoes percent-encoding on keys issued in their encoded form
///
/// The provider hands out each key twice, raw and percent-encoded. The
/// query serializer encodes again, so an encoded key must be decoded first.
fn decoded_key(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }

    form_urlencoded::parse(format!("k={}", raw).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| raw.to_string())
}
