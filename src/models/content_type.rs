//! Provider content categories
//!
//! The provider partitions its whole dataset into these eight categories;
//! the set is fixed and kept in-process rather than fetched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider content category (`contentTypeId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    TouristSpot,
    CulturalFacility,
    Festival,
    TravelCourse,
    LeisureSports,
    Accommodation,
    Shopping,
    Restaurant,
}

impl ContentType {
    /// Every category, in provider id order
    pub const ALL: [ContentType; 8] = [
        Self::TouristSpot,
        Self::CulturalFacility,
        Self::Festival,
        Self::TravelCourse,
        Self::LeisureSports,
        Self::Accommodation,
        Self::Shopping,
        Self::Restaurant,
    ];

    /// The provider's `contentTypeId` value
    pub fn id(&self) -> &'static str {
        match self {
            Self::TouristSpot => "12",
            Self::CulturalFacility => "14",
            Self::Festival => "15",
            Self::TravelCourse => "25",
            Self::LeisureSports => "28",
            Self::Accommodation => "32",
            Self::Shopping => "38",
            Self::Restaurant => "39",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::TouristSpot => "관광지",
            Self::CulturalFacility => "문화시설",
            Self::Festival => "축제공연행사",
            Self::TravelCourse => "여행코스",
            Self::LeisureSports => "레포츠",
            Self::Accommodation => "숙박",
            Self::Shopping => "쇼핑",
            Self::Restaurant => "음식점",
        }
    }

    /// Parses a `contentTypeId`
    ///
    /// Returns None if the id doesn't match any known category.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id.trim())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
