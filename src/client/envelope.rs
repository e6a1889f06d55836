//! Provider envelope decoding and normalization
//!
//! Every response is wrapped as
//! `{ response: { header: { resultCode, resultMsg }, body: { items: { item }, totalCount, pageNo, numOfRows } } }`,
//! though the outer `response` layer is not always present. Inside, `items`
//! may be missing, `null`, or `""` when nothing matched, and `item` is a bare
//! object for single-row results but an array otherwise. This module hides
//! all of that behind [`parse`] and [`to_array`].

use crate::models::de;
use crate::TourError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Result codes the provider uses for success
const SUCCESS_CODES: [&str; 2] = ["0000", "00"];

/// Header of a provider response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseHeader {
    #[serde(rename = "resultCode", default, deserialize_with = "de::opt_string")]
    pub result_code: Option<String>,

    #[serde(rename = "resultMsg", default, deserialize_with = "de::opt_string")]
    pub result_msg: Option<String>,
}

/// Body of a provider response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseBody {
    /// Raw `items` node; shape varies, see module docs
    #[serde(default)]
    pub items: Value,

    #[serde(rename = "totalCount", default, deserialize_with = "de::opt_count")]
    pub total_count: Option<u64>,

    #[serde(rename = "pageNo", default, deserialize_with = "de::opt_count")]
    pub page_no: Option<u64>,

    #[serde(rename = "numOfRows", default, deserialize_with = "de::opt_count")]
    pub num_of_rows: Option<u64>,
}

/// A decoded provider response
#[derive(Debug, Clone, Default)]
pub struct ProviderEnvelope {
    pub header: Option<ResponseHeader>,
    pub body: Option<ResponseBody>,
}

/// Frame as it appears on the wire, either inside `response` or at top level
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    header: Option<ResponseHeader>,

    #[serde(default)]
    body: Option<ResponseBody>,

    // Some gateway errors skip the header and put the code at top level
    #[serde(rename = "resultCode", default, deserialize_with = "de::opt_string")]
    result_code: Option<String>,

    #[serde(rename = "resultMsg", default, deserialize_with = "de::opt_string")]
    result_msg: Option<String>,
}

impl ProviderEnvelope {
    /// Decodes a raw response body
    ///
    /// # Returns
    ///
    /// * `Ok(ProviderEnvelope)` - Decoded envelope with a success (or absent) result code
    /// * `Err(TourError::Provider)` - The provider reported an error code, or sent its XML error page
    /// * `Err(TourError::Decode)` - The body is not JSON of the expected shape
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TourError> {
        let text = String::from_utf8_lossy(bytes);
        let trimmed = text.trim_start();
        if trimmed.starts_with('<') {
            return Err(xml_error(trimmed));
        }

        let mut value: Value = serde_json::from_str(trimmed)?;
        let frame = if value.get("response").is_some() {
            value["response"].take()
        } else {
            value
        };
        let raw: RawFrame = serde_json::from_value(frame)?;

        let header = raw.header.or_else(|| {
            raw.result_code.clone().map(|code| ResponseHeader {
                result_code: Some(code),
                result_msg: raw.result_msg.clone(),
            })
        });

        if let Some(header) = &header {
            if let Some(code) = &header.result_code {
                if !SUCCESS_CODES.contains(&code.as_str()) {
                    return Err(TourError::Provider {
                        code: code.clone(),
                        message: header
                            .result_msg
                            .clone()
                            .unwrap_or_else(|| "unknown provider error".to_string()),
                    });
                }
            }
        }

        Ok(Self {
            header,
            body: raw.body,
        })
    }

    pub fn total_count(&self) -> Option<u64> {
        self.body.as_ref().and_then(|b| b.total_count)
    }

    pub fn page_no(&self) -> Option<u64> {
        self.body.as_ref().and_then(|b| b.page_no)
    }

    pub fn num_of_rows(&self) -> Option<u64> {
        self.body.as_ref().and_then(|b| b.num_of_rows)
    }
}

/// A single item or a list of items, as the provider sends them
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Extracts `body.items.item` from an envelope
///
/// # Returns
///
/// * `Ok(OneOrMany<T>)` - The item node, in whichever shape it arrived
/// * `Err(TourError::MissingData)` - No body, no items, or a null/absent item
/// * `Err(TourError::Decode)` - The item node does not match `T`
pub fn parse<T: DeserializeOwned>(envelope: &ProviderEnvelope) -> Result<OneOrMany<T>, TourError> {
    let item = envelope
        .body
        .as_ref()
        .and_then(|body| body.items.get("item"))
        .filter(|item| !item.is_null())
        .ok_or(TourError::MissingData)?;

    let parsed = match item {
        Value::Array(_) => OneOrMany::Many(Vec::<T>::deserialize(item)?),
        _ => OneOrMany::One(T::deserialize(item)?),
    };
    Ok(parsed)
}

/// Normalizes a parsed item node into a vector
///
/// A bare object becomes a one-element vector; a list passes through.
pub fn to_array<T>(value: OneOrMany<T>) -> Vec<T> {
    value.into_vec()
}

/// Builds a provider error from the gateway's XML error page
fn xml_error(body: &str) -> TourError {
    let code = xml_tag(body, "returnReasonCode")
        .or_else(|| xml_tag(body, "resultCode"))
        .unwrap_or_else(|| "XML".to_string());
    let message = xml_tag(body, "returnAuthMsg")
        .or_else(|| xml_tag(body, "errMsg"))
        .or_else(|| xml_tag(body, "resultMsg"))
        .unwrap_or_else(|| "provider returned a non-JSON response".to_string());
    TourError::Provider { code, message }
}

fn xml_tag(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    let value = body[start..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
