//! Typed records for provider content and derived results
//!
//! # Components
//!
//! - Content records (`TourItem`, `TourDetail`, `TourIntro`, `TourImage`, `PetTourInfo`, `AreaCode`)
//! - `ListResult`: one page of a list-style endpoint
//! - `ContentType`: the fixed category enumeration
//! - Derived statistics (`RegionStat`, `CategoryStat`, `StatsSummary`) and `RecommendationSet`

mod content_type;
pub(crate) mod de;
mod items;
mod list;
mod stats;
pub mod text;

// Re-export main types
pub use content_type::ContentType;
pub use items::{AreaCode, PetTourInfo, TourDetail, TourImage, TourIntro, TourItem};
pub use list::ListResult;
pub use stats::{CategoryStat, RecommendationSet, RegionStat, StatsSummary};
