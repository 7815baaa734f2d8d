//! HTTP API over the recommendation engine.
//!
//! Status mapping: malformed or out-of-range request values are 422, an
//! unavailable engine is 500, everything else (including "no matching items")
//! is 200 with a structured body. CORS is open to any origin.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use menufit_engine::{
    Category, ContainerSpec, EngineState, EngineStats, HybridQuery, RecommendError,
    RecommendationResponse, ResponseStatus, SimpleRecommendation, ALGORITHM_VERSION,
    DEFAULT_MAX_RECOMMENDATIONS,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

pub const SERVICE_NAME: &str = "menufit container-fit menu recommendations";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    engine: Arc<EngineState>,
}

impl AppState {
    pub fn new(engine: EngineState) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    /// Highest accepted `top_k`
    fn ceiling(&self) -> usize {
        self.engine
            .stats()
            .map_or(DEFAULT_MAX_RECOMMENDATIONS, |stats| stats.max_recommendations)
    }
}

/// Body of both recommendation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub top_k: Option<i64>,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl RecommendRequest {
    pub fn container(&self) -> ContainerSpec {
        ContainerSpec::new(self.width, self.length, self.height)
    }

    /// Check dimensions and `top_k` range, returning the accepted `top_k`
    ///
    /// An omitted `top_k` asks for as many results as the ceiling allows.
    pub fn validate(&self, ceiling: usize) -> Result<usize, RecommendError> {
        self.container().validate()?;

        let Some(requested) = self.top_k else {
            return Ok(ceiling.min(DEFAULT_MAX_RECOMMENDATIONS));
        };
        match usize::try_from(requested) {
            Ok(top_k) if (1..=ceiling).contains(&top_k) => Ok(top_k),
            _ => Err(RecommendError::InvalidTopK {
                requested: usize::try_from(requested).unwrap_or(0),
                max: ceiling,
            }),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .map(Category::parse)
    }

    pub fn hybrid_query(&self, top_k: usize) -> HybridQuery {
        let mut query = HybridQuery::new(self.container())
            .category(self.category())
            .top_k(top_k)
            .price_range(self.min_price, self.max_price);
        if let Some(timestamp) = self.timestamp {
            query = query.at(timestamp);
        }
        if let Some(user_id) = &self.user_id {
            query = query.user_id(user_id.clone());
        }
        query
    }
}

/// `GET /` body
#[derive(Debug, Serialize)]
pub struct ServiceBanner {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub statistics: EngineStats,
}

impl ServiceBanner {
    pub fn for_state(state: &EngineState) -> Self {
        match state.engine() {
            Ok(engine) => Self {
                message: SERVICE_NAME,
                version: SERVICE_VERSION,
                status: "running",
                algorithm: Some(ALGORITHM_VERSION),
                error: None,
                statistics: engine.stats(),
            },
            Err(err) => Self {
                message: SERVICE_NAME,
                version: SERVICE_VERSION,
                status: "error",
                algorithm: None,
                error: Some(err.to_string()),
                statistics: EngineStats {
                    total_menus: 0,
                    total_restaurants: 0,
                    categories: Vec::new(),
                    max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub ai_model_loaded: bool,
}

/// Echo of the simple-endpoint query
#[derive(Debug, Serialize)]
pub struct SimpleQueryEcho {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub top_k: usize,
}

/// `POST /recommend/simple` body
#[derive(Debug, Serialize)]
pub struct SimpleResponse {
    pub status: ResponseStatus,
    pub count: usize,
    pub recommendations: Vec<SimpleRecommendation>,
    pub query: SimpleQueryEcho,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/recommend/advanced", post(recommend_advanced))
        .route("/recommend/simple", post(recommend_simple))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn banner(State(state): State<AppState>) -> Response {
    Json(ServiceBanner::for_state(state.engine())).into_response()
}

pub async fn health(State(state): State<AppState>) -> Response {
    Json(HealthReport {
        status: "healthy",
        ai_model_loaded: state.engine().is_ready(),
    })
    .into_response()
}

pub async fn recommend_advanced(State(state): State<AppState>, body: Bytes) -> Response {
    let (request, top_k) = match parse_request(&state, &body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    log::info!(
        "Advanced recommendation request: {} category={}",
        request.container(),
        request.category.as_deref().unwrap_or("all")
    );

    let result = state.engine().hybrid(&request.hybrid_query(top_k));
    let status = match &result {
        Err(RecommendError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };
    let response = RecommendationResponse::from(result);
    log::info!("Recommendation result: {:?}", response.status);
    (status, Json(response)).into_response()
}

pub async fn recommend_simple(State(state): State<AppState>, body: Bytes) -> Response {
    let (request, top_k) = match parse_request(&state, &body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    log::info!("Simple recommendation request: {}", request.container());

    match state.engine().simple(&request.container(), top_k) {
        Ok(recommendations) => Json(SimpleResponse {
            status: ResponseStatus::Success,
            count: recommendations.len(),
            recommendations,
            query: SimpleQueryEcho {
                width: request.width,
                length: request.length,
                height: request.height,
                top_k,
            },
        })
        .into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err),
    }
}

/// Decode and validate a request body, or the 422 response to send back
fn parse_request(state: &AppState, body: &[u8]) -> Result<(RecommendRequest, usize), Response> {
    let request: RecommendRequest = serde_json::from_slice(body).map_err(|err| {
        log::debug!("Rejected request body: {err}");
        invalid_request(format!("invalid request body: {err}"))
    })?;
    let top_k = request
        .validate(state.ceiling())
        .map_err(|err| error_response(StatusCode::UNPROCESSABLE_ENTITY, &err))?;
    Ok((request, top_k))
}

fn error_response(status: StatusCode, err: &RecommendError) -> Response {
    if status.is_server_error() {
        log::error!("Recommendation failed: {err}");
    }
    (status, Json(RecommendationResponse::error(err))).into_response()
}

fn invalid_request(message: String) -> Response {
    let body = RecommendationResponse {
        status: ResponseStatus::Error,
        message,
        data: Vec::new(),
        metadata: None,
        error_code: Some("invalid_request".to_string()),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(width: f64, top_k: Option<i64>) -> RecommendRequest {
        RecommendRequest {
            width,
            length: 20.0,
            height: 10.0,
            category: None,
            top_k,
            min_price: None,
            max_price: None,
            user_id: None,
            timestamp: None,
        }
    }

    #[test]
    fn omitted_top_k_follows_configured_ceiling() {
        assert_eq!(request(20.0, None).validate(5), Ok(5));
        assert_eq!(request(20.0, None).validate(3), Ok(3));
        assert_eq!(request(20.0, None).validate(8), Ok(5));
        assert_eq!(request(20.0, Some(1)).validate(5), Ok(1));
    }

    #[test]
    fn top_k_outside_range_is_rejected() {
        for top_k in [0, 6, -3] {
            assert!(matches!(
                request(20.0, Some(top_k)).validate(5),
                Err(RecommendError::InvalidTopK { max: 5, .. })
            ));
        }
    }

    #[test]
    fn non_positive_dimension_is_rejected_first() {
        assert!(matches!(
            request(0.0, Some(9)).validate(5),
            Err(RecommendError::InvalidSize { .. })
        ));
    }

    #[test]
    fn blank_category_means_all() {
        let mut req = request(20.0, None);
        req.category = Some("  ".to_string());
        assert_eq!(req.category(), None);
        req.category = Some("한식".to_string());
        assert_eq!(req.category(), Some(Category::Korean));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"width": 20, "length": 20, "height": 10}"#).unwrap();
        assert_eq!(req, request(20.0, None));
    }
}
