//! Content records returned by the provider
//!
//! Field names mirror the provider's wire names so that records serialize
//! back out in the shape downstream consumers already know.

use crate::models::de;
use crate::models::text::{extract_href, strip_markup};
use crate::models::ContentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A region (or sub-region) code entry from `areaCode1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaCode {
    #[serde(deserialize_with = "de::string")]
    pub code: String,

    #[serde(deserialize_with = "de::string")]
    pub name: String,

    #[serde(default, deserialize_with = "de::opt_count")]
    pub rnum: Option<u64>,
}

/// One row of a listing or keyword search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourItem {
    #[serde(rename = "contentid", deserialize_with = "de::string")]
    pub content_id: String,

    #[serde(rename = "contenttypeid", default, deserialize_with = "de::opt_string")]
    pub content_type_id: Option<String>,

    #[serde(default, deserialize_with = "de::string")]
    pub title: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub addr1: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub addr2: Option<String>,

    #[serde(rename = "areacode", default, deserialize_with = "de::opt_string")]
    pub area_code: Option<String>,

    #[serde(rename = "sigungucode", default, deserialize_with = "de::opt_string")]
    pub sigungu_code: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub cat1: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub cat2: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub cat3: Option<String>,

    #[serde(rename = "firstimage", default, deserialize_with = "de::opt_string")]
    pub first_image: Option<String>,

    #[serde(rename = "firstimage2", default, deserialize_with = "de::opt_string")]
    pub first_image_thumb: Option<String>,

    #[serde(rename = "mapx", default, deserialize_with = "de::opt_string")]
    pub map_x: Option<String>,

    #[serde(rename = "mapy", default, deserialize_with = "de::opt_string")]
    pub map_y: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub tel: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub zipcode: Option<String>,

    #[serde(rename = "createdtime", default, deserialize_with = "de::opt_string")]
    pub created_time: Option<String>,

    #[serde(rename = "modifiedtime", default, deserialize_with = "de::opt_string")]
    pub modified_time: Option<String>,
}

impl TourItem {
    /// The item's category, if it is one of the known ones
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type_id.as_deref().and_then(ContentType::from_id)
    }

    /// addr1 and addr2 joined with a single space
    pub fn full_address(&self) -> Option<String> {
        join_address(self.addr1.as_deref(), self.addr2.as_deref())
    }

    /// Longitude/latitude pair, when both parse
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let x = self.map_x.as_deref()?.trim().parse().ok()?;
        let y = self.map_y.as_deref()?.trim().parse().ok()?;
        Some((x, y))
    }
}

/// Common detail record from `detailCommon1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourDetail {
    #[serde(flatten)]
    pub item: TourItem,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub homepage: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub overview: Option<String>,

    #[serde(rename = "telname", default, deserialize_with = "de::opt_string")]
    pub tel_name: Option<String>,
}

impl TourDetail {
    pub fn content_id(&self) -> &str {
        &self.item.content_id
    }

    /// addr1 and addr2 joined with a single space
    pub fn full_address(&self) -> Option<String> {
        self.item.full_address()
    }

    /// Overview with provider markup removed
    pub fn overview_text(&self) -> Option<String> {
        self.overview
            .as_deref()
            .map(strip_markup)
            .filter(|text| !text.is_empty())
    }

    /// Link target of the homepage field
    pub fn homepage_url(&self) -> Option<String> {
        self.homepage.as_deref().and_then(extract_href)
    }
}

/// Category-specific detail from `detailIntro1`
///
/// Each category carries a different set of fields (opening hours for
/// spots, check-in times for lodging, menus for restaurants, ...), so the
/// record keeps them as a string map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourIntro {
    #[serde(rename = "contentid", deserialize_with = "de::string")]
    pub content_id: String,

    #[serde(rename = "contenttypeid", default, deserialize_with = "de::opt_string")]
    pub content_type_id: Option<String>,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl TourIntro {
    /// A non-blank field value, markup removed
    pub fn field(&self, name: &str) -> Option<String> {
        let raw = match self.fields.get(name)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let text = strip_markup(&raw);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Names of the fields that carry a value
    pub fn populated_fields(&self) -> Vec<&str> {
        self.fields
            .keys()
            .filter(|k| self.field(k).is_some())
            .map(String::as_str)
            .collect()
    }
}

/// One image from `detailImage1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourImage {
    #[serde(rename = "contentid", deserialize_with = "de::string")]
    pub content_id: String,

    #[serde(rename = "originimgurl", default, deserialize_with = "de::opt_string")]
    pub origin_url: Option<String>,

    #[serde(rename = "smallimageurl", default, deserialize_with = "de::opt_string")]
    pub small_url: Option<String>,

    #[serde(rename = "imgname", default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,

    #[serde(rename = "serialnum", default, deserialize_with = "de::opt_string")]
    pub serial_num: Option<String>,

    #[serde(rename = "cpyrhtDivCd", default, deserialize_with = "de::opt_string")]
    pub copyright_code: Option<String>,
}

/// Companion-animal policy from `detailPetTour1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetTourInfo {
    #[serde(rename = "contentid", default, deserialize_with = "de::string")]
    pub content_id: String,

    /// Which animals may accompany visitors
    #[serde(rename = "acmpyTypeCd", default, deserialize_with = "de::opt_string")]
    pub accompany_type: Option<String>,

    /// Where animals are allowed on site
    #[serde(rename = "acmpyPsblCpam", default, deserialize_with = "de::opt_string")]
    pub allowed_animals: Option<String>,

    /// Requirements for bringing an animal
    #[serde(rename = "acmpyNeedMtr", default, deserialize_with = "de::opt_string")]
    pub requirements: Option<String>,

    #[serde(rename = "etcAcmpyInfo", default, deserialize_with = "de::opt_string")]
    pub other_info: Option<String>,

    #[serde(rename = "relaPosesFclty", default, deserialize_with = "de::opt_string")]
    pub facilities: Option<String>,

    #[serde(rename = "relaFrnshPrdlst", default, deserialize_with = "de::opt_string")]
    pub provided_items: Option<String>,

    #[serde(rename = "relaPurcPrdlst", default, deserialize_with = "de::opt_string")]
    pub purchasable_items: Option<String>,

    #[serde(rename = "relaRntlPrdlst", default, deserialize_with = "de::opt_string")]
    pub rental_items: Option<String>,

    #[serde(rename = "relaAcdntRiskMtr", default, deserialize_with = "de::opt_string")]
    pub accident_risk: Option<String>,
}

impl PetTourInfo {
    /// True when no informational field carries a value
    pub fn is_empty(&self) -> bool {
        [
            &self.accompany_type,
            &self.allowed_animals,
            &self.requirements,
            &self.other_info,
            &self.facilities,
            &self.provided_items,
            &self.purchasable_items,
            &self.rental_items,
            &self.accident_risk,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}

fn join_address(addr1: Option<&str>, addr2: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [addr1, addr2]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
