use crate::context::{CategoryWeights, TimeSlot};
use crate::error::RecommendError;
use chrono::NaiveDateTime;
use menufit_catalog::{MenuItem, MenuSize};
use serde::{Deserialize, Serialize};

pub const ALGORITHM_VERSION: &str = "hybrid_v2.0";

/// Round to one decimal place, ties to the nearest even digit
///
/// Goes through the shortest decimal rendering, so `0.25` becomes `0.2` and
/// `0.35` (stored just below) becomes `0.3`.
#[must_use]
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Sub-scores of one (container, item) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub fit_score: f64,
    pub preference_score: f64,
    pub content_score: f64,
    pub final_score: f64,
}

impl ScoreBundle {
    /// Bundle with every score rounded to one decimal
    #[must_use]
    pub fn rounded(fit: f64, preference: f64, content: f64, final_score: f64) -> Self {
        Self {
            fit_score: round1(fit),
            preference_score: round1(preference),
            content_score: round1(content),
            final_score: round1(final_score),
        }
    }
}

/// One ranked, explained recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub menu_id: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub menu_name: String,
    /// Source category label
    pub category: String,
    pub price: i64,
    pub size: MenuSize,
    pub scores: ScoreBundle,
    /// Item volume as a percentage of container volume
    pub volume_utilization: f64,
    pub explanation: String,
    /// `(multiplier - 1) * 100`
    pub contextual_boost: f64,
    pub place_id: Option<String>,
}

/// Catalog-order fit match without scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRecommendation {
    pub menu_id: String,
    pub menu_name: String,
    pub category: String,
    pub price: i64,
    pub size: MenuSize,
}

impl From<&MenuItem> for SimpleRecommendation {
    fn from(item: &MenuItem) -> Self {
        Self {
            menu_id: item.menu_id.clone(),
            menu_name: item.name.clone(),
            category: item.category_label.clone(),
            price: item.price,
            size: item.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub container_size: String,
    pub algorithm_version: String,
    pub time_slot: TimeSlot,
    pub contextual_weights: CategoryWeights,
    /// Items that passed the filters and the fit check
    pub total_candidates: usize,
    pub returned_count: usize,
    pub max_recommendations: usize,
    pub is_limited: bool,
    pub recommendation_time: NaiveDateTime,
}

/// Successful hybrid result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub message: String,
    pub data: Vec<Recommendation>,
    pub metadata: RecommendationMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Transport-facing envelope: errors become an error status with empty data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecommendationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl RecommendationResponse {
    #[must_use]
    pub fn error(err: &RecommendError) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: err.to_string(),
            data: Vec::new(),
            metadata: None,
            error_code: Some(err.code().to_string()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl From<RecommendationSet> for RecommendationResponse {
    fn from(set: RecommendationSet) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: set.message,
            data: set.data,
            metadata: Some(set.metadata),
            error_code: None,
        }
    }
}

impl From<Result<RecommendationSet, RecommendError>> for RecommendationResponse {
    fn from(result: Result<RecommendationSet, RecommendError>) -> Self {
        match result {
            Ok(set) => set.into(),
            Err(err) => Self::error(&err),
        }
    }
}

/// Success message for a hybrid result
#[must_use]
pub fn summary_message(returned: usize, total: usize, max: usize, is_limited: bool) -> String {
    if is_limited {
        format!("Recommended {returned} menus (top {max} of {total} candidates).")
    } else {
        format!("Recommended {returned} menus.")
    }
}
