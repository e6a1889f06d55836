//! Request parameter shaping
//!
//! Each provider operation takes its own mix of query parameters. Callers
//! describe requests with the typed queries here; `QueryParams` drops unset
//! values before anything reaches the query string.

use crate::models::ContentType;
use crate::TourError;

/// Page used when the caller does not pick one
pub const DEFAULT_PAGE_NO: u32 = 1;

/// Page size used when the caller does not pick one
pub const DEFAULT_NUM_OF_ROWS: u32 = 10;

/// Largest page size the provider accepts
pub const MAX_NUM_OF_ROWS: u32 = 1000;

/// Provider operations, by path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AreaCode,
    AreaBasedList,
    SearchKeyword,
    DetailCommon,
    DetailIntro,
    DetailImage,
    DetailPetTour,
}

impl Operation {
    pub fn path(&self) -> &'static str {
        match self {
            Self::AreaCode => "areaCode1",
            Self::AreaBasedList => "areaBasedList1",
            Self::SearchKeyword => "searchKeyword1",
            Self::DetailCommon => "detailCommon1",
            Self::DetailIntro => "detailIntro1",
            Self::DetailImage => "detailImage1",
            Self::DetailPetTour => "detailPetTour1",
        }
    }
}

/// Result ordering (`arrange`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Arrange {
    /// By title
    Title,
    /// By last modification
    Modified,
    /// By creation
    Created,
    /// By title, items with an image only
    TitleWithImage,
    /// By last modification, items with an image only
    ModifiedWithImage,
    /// By creation, items with an image only
    CreatedWithImage,
}

impl Arrange {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Title => "A",
            Self::Modified => "C",
            Self::Created => "D",
            Self::TitleWithImage => "O",
            Self::ModifiedWithImage => "Q",
            Self::CreatedWithImage => "R",
        }
    }
}

/// Ordered query parameters; `None` values never reach the wire
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(&'static str, Option<String>)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter that is always present
    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.push((key, Some(value.into())));
        self
    }

    /// Adds a parameter that is dropped when `None` or blank
    pub fn opt<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        let value = value
            .map(|v| v.to_string())
            .filter(|v| !v.trim().is_empty());
        self.0.push((key, value));
        self
    }

    /// Pairs that carry a value, in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (*k, v)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Query for `areaBasedList1`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaListQuery {
    pub area_code: Option<String>,
    pub sigungu_code: Option<String>,
    pub content_type_id: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub cat3: Option<String>,
    pub arrange: Option<Arrange>,
    pub page_no: Option<u32>,
    pub num_of_rows: Option<u32>,
}

impl AreaListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(mut self, area_code: impl Into<String>) -> Self {
        self.area_code = Some(area_code.into());
        self
    }

    pub fn sigungu(mut self, sigungu_code: impl Into<String>) -> Self {
        self.sigungu_code = Some(sigungu_code.into());
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type_id = Some(content_type.id().to_string());
        self
    }

    pub fn content_type_id(mut self, content_type_id: impl Into<String>) -> Self {
        self.content_type_id = Some(content_type_id.into());
        self
    }

    pub fn arrange(mut self, arrange: Arrange) -> Self {
        self.arrange = Some(arrange);
        self
    }

    pub fn page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }

    pub fn rows(mut self, num_of_rows: u32) -> Self {
        self.num_of_rows = Some(num_of_rows);
        self
    }

    /// Page number and size after defaults
    pub fn paging(&self) -> (u32, u32) {
        (
            self.page_no.unwrap_or(DEFAULT_PAGE_NO),
            self.num_of_rows.unwrap_or(DEFAULT_NUM_OF_ROWS),
        )
    }

    pub fn to_params(&self) -> Result<QueryParams, TourError> {
        let (page_no, num_of_rows) = self.paging();
        validate_paging(page_no, num_of_rows)?;

        Ok(QueryParams::new()
            .set("pageNo", page_no.to_string())
            .set("numOfRows", num_of_rows.to_string())
            .opt("arrange", self.arrange.map(|a| a.code()))
            .opt("contentTypeId", self.content_type_id.as_deref())
            .opt("areaCode", self.area_code.as_deref())
            .opt("sigunguCode", self.sigungu_code.as_deref())
            .opt("cat1", self.cat1.as_deref())
            .opt("cat2", self.cat2.as_deref())
            .opt("cat3", self.cat3.as_deref()))
    }
}

/// Query for `searchKeyword1`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordQuery {
    pub keyword: String,
    pub area_code: Option<String>,
    pub sigungu_code: Option<String>,
    pub content_type_id: Option<String>,
    pub arrange: Option<Arrange>,
    pub page_no: Option<u32>,
    pub num_of_rows: Option<u32>,
}

impl KeywordQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn area(mut self, area_code: impl Into<String>) -> Self {
        self.area_code = Some(area_code.into());
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type_id = Some(content_type.id().to_string());
        self
    }

    pub fn page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }

    pub fn rows(mut self, num_of_rows: u32) -> Self {
        self.num_of_rows = Some(num_of_rows);
        self
    }

    pub fn paging(&self) -> (u32, u32) {
        (
            self.page_no.unwrap_or(DEFAULT_PAGE_NO),
            self.num_of_rows.unwrap_or(DEFAULT_NUM_OF_ROWS),
        )
    }

    pub fn to_params(&self) -> Result<QueryParams, TourError> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(TourError::InvalidParameter("keyword cannot be empty".to_string()));
        }

        let (page_no, num_of_rows) = self.paging();
        validate_paging(page_no, num_of_rows)?;

        Ok(QueryParams::new()
            .set("keyword", keyword)
            .set("pageNo", page_no.to_string())
            .set("numOfRows", num_of_rows.to_string())
            .opt("arrange", self.arrange.map(|a| a.code()))
            .opt("contentTypeId", self.content_type_id.as_deref())
            .opt("areaCode", self.area_code.as_deref())
            .opt("sigunguCode", self.sigungu_code.as_deref()))
    }
}

/// Checks that a content id is a non-empty run of ASCII digits
pub fn validate_content_id(content_id: &str) -> Result<&str, TourError> {
    let trimmed = content_id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TourError::InvalidParameter(format!(
            "content id must be numeric, got '{}'",
            content_id
        )));
    }
    Ok(trimmed)
}

fn validate_paging(page_no: u32, num_of_rows: u32) -> Result<(), TourError> {
    if page_no == 0 {
        return Err(TourError::InvalidParameter("pageNo must be >= 1".to_string()));
    }
    if num_of_rows == 0 || num_of_rows > MAX_NUM_OF_ROWS {
        return Err(TourError::InvalidParameter(format!(
            "numOfRows must be between 1 and {}, got {}",
            MAX_NUM_OF_ROWS, num_of_rows
        )));
    }
    Ok(())
}
