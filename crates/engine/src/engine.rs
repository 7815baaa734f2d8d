//! Engine: owns the catalog and its features, runs the hybrid and simple pipelines.
//!
//! Hybrid pipeline per request:
//! validate → catalog filter → fit check → content / preference / context
//! scores → diversity bonus (scan order) → stable sort → truncate.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use menufit_catalog::{Catalog, CatalogFilter, Category, MenuItem, UNKNOWN_RESTAURANT};
use menufit_features::FeatureSet;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::container::ContainerSpec;
use crate::context::{CategoryWeights, ContextualWeighter};
use crate::error::{EngineError, ItemProcessingError, RecommendError, Result};
use crate::explain::explain;
use crate::fit::{fit_score, utilization};
use crate::preference::{ConstantPreference, PreferenceFeatures, PreferenceModel};
use crate::ranker::{rank, DiversityTracker};
use crate::response::{
    round1, summary_message, Recommendation, RecommendationMetadata, RecommendationSet,
    ScoreBundle, SimpleRecommendation, ALGORITHM_VERSION,
};

/// Parameters of a hybrid recommendation call
#[derive(Debug, Clone, PartialEq)]
pub struct HybridQuery {
    pub container: ContainerSpec,
    pub category: Option<Category>,
    pub top_k: usize,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Time used for contextual weighting; local now when absent
    pub timestamp: Option<NaiveDateTime>,
    pub user_id: Option<String>,
}

impl HybridQuery {
    #[must_use]
    pub fn new(container: ContainerSpec) -> Self {
        Self {
            container,
            category: None,
            top_k: crate::config::DEFAULT_MAX_RECOMMENDATIONS,
            min_price: None,
            max_price: None,
            timestamp: None,
            user_id: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub const fn price_range(mut self, min_price: Option<i64>, max_price: Option<i64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    #[must_use]
    pub const fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    fn catalog_filter(&self) -> CatalogFilter {
        CatalogFilter::new()
            .category(self.category.clone())
            .price_range(self.min_price, self.max_price)
    }
}

/// Counters for status reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub total_menus: usize,
    pub total_restaurants: usize,
    pub categories: Vec<String>,
    pub max_recommendations: usize,
}

/// Immutable recommendation engine built once at startup
pub struct Engine {
    catalog: Catalog,
    features: FeatureSet,
    config: EngineConfig,
    weighter: ContextualWeighter,
    preference: Arc<dyn PreferenceModel>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("menus", &self.catalog.len())
            .field("restaurants", &self.catalog.restaurant_count())
            .field("feature_dimension", &self.features.content_dimension())
            .field("preference_model", &self.preference.name())
            .finish()
    }
}

impl Engine {
    /// Prepare features and build the engine with the constant preference model
    pub fn new(catalog: Catalog, config: EngineConfig) -> std::result::Result<Self, EngineError> {
        config.validate()?;
        let features = FeatureSet::prepare(&catalog, config.content.vectorizer)?;
        let weighter = ContextualWeighter::new(config.contextual.clone());

        log::info!(
            "Recommendation engine ready: {} menus, {} restaurants, ceiling {}",
            catalog.len(),
            catalog.restaurant_count(),
            config.max_recommendations
        );

        Ok(Self {
            catalog,
            features,
            config,
            weighter,
            preference: Arc::new(ConstantPreference::default()),
        })
    }

    /// Swap the preference model
    #[must_use]
    pub fn with_preference_model(mut self, model: Arc<dyn PreferenceModel>) -> Self {
        log::debug!("Using preference model '{}'", model.name());
        self.preference = model;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn max_recommendations(&self) -> usize {
        self.config.max_recommendations
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_menus: self.catalog.len(),
            total_restaurants: self.catalog.restaurant_count(),
            categories: self.catalog.categories(),
            max_recommendations: self.config.max_recommendations,
        }
    }

    /// Ranked, explained recommendations for a container
    pub fn hybrid(&self, query: &HybridQuery) -> Result<RecommendationSet> {
        query.container.validate()?;
        if query.top_k == 0 {
            return Err(RecommendError::InvalidTopK {
                requested: query.top_k,
                max: self.config.max_recommendations,
            });
        }
        let limit = query.top_k.min(self.config.max_recommendations);

        let candidates = self.catalog.filter_indexed(&query.catalog_filter());
        if candidates.is_empty() {
            return Err(RecommendError::NoMatchingItems);
        }

        let timestamp = query
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        let (slot, weights) = self.weighter.weights_for(&timestamp);
        log::debug!(
            "Scoring {} candidates for {} ({slot} weights)",
            candidates.len(),
            query.container
        );

        let mut diversity = DiversityTracker::new();
        let mut recommendations = Vec::new();
        for (idx, item) in candidates {
            match self.score_item(&query.container, idx, item, weights, &diversity) {
                Ok(Some(recommendation)) => {
                    diversity.accept(&item.category);
                    recommendations.push(recommendation);
                }
                Ok(None) => {}
                Err(err) => log::warn!("Skipping menu during scoring: {err}"),
            }
        }

        let total_candidates = recommendations.len();
        rank(&mut recommendations, limit);

        if let Some(user_id) = &query.user_id {
            let ids: Vec<&str> = recommendations.iter().map(|r| r.menu_id.as_str()).collect();
            log::info!(
                "Recommendation log: user={user_id} container={} algorithm={ALGORITHM_VERSION} menus={ids:?}",
                query.container
            );
        }

        let max = self.config.max_recommendations;
        let is_limited = total_candidates > max;
        let returned_count = recommendations.len();
        Ok(RecommendationSet {
            message: summary_message(returned_count, total_candidates, max, is_limited),
            data: recommendations,
            metadata: RecommendationMetadata {
                container_size: query.container.to_string(),
                algorithm_version: ALGORITHM_VERSION.to_string(),
                time_slot: slot,
                contextual_weights: weights.clone(),
                total_candidates,
                returned_count,
                max_recommendations: max,
                is_limited,
                recommendation_time: timestamp,
            },
        })
    }

    /// Score one item; `Ok(None)` when it does not fit the container
    fn score_item(
        &self,
        container: &ContainerSpec,
        idx: usize,
        item: &MenuItem,
        weights: &CategoryWeights,
        diversity: &DiversityTracker,
    ) -> std::result::Result<Option<Recommendation>, ItemProcessingError> {
        let fit = fit_score(container, &item.size);
        if fit <= 0.0 {
            return Ok(None);
        }

        let similar = self.features.similar(idx, self.config.content.similar_k);
        let content = similar.len() as f64 * 2.0;

        let features = PreferenceFeatures::new(container, item);
        let preference = self.preference.predict(&features) * 10.0;
        ensure_finite(item, "preference", preference)?;

        let multiplier = weights.multiplier(&item.category);
        let final_score = self.config.weights.final_score(
            fit,
            preference,
            content,
            item.popularity_score,
            multiplier,
            diversity.bonus(&item.category),
        );
        ensure_finite(item, "final", final_score)?;

        let restaurant = self.catalog.restaurant_by_id(&item.restaurant_id);
        Ok(Some(Recommendation {
            menu_id: item.menu_id.clone(),
            restaurant_id: item.restaurant_id.clone(),
            restaurant_name: restaurant
                .map_or_else(|| UNKNOWN_RESTAURANT.to_string(), |r| r.name.clone()),
            menu_name: item.name.clone(),
            category: item.category_label.clone(),
            price: item.price,
            size: item.size,
            scores: ScoreBundle::rounded(fit, preference, content, final_score),
            volume_utilization: round1(utilization(container, &item.size)),
            explanation: explain(fit, preference, content, multiplier),
            contextual_boost: round1((multiplier - 1.0) * 100.0),
            place_id: restaurant.and_then(|r| r.place_id.clone()),
        }))
    }

    /// First `top_k` catalog items that fit the container, unscored
    pub fn simple(&self, container: &ContainerSpec, top_k: usize) -> Vec<SimpleRecommendation> {
        self.catalog
            .items()
            .iter()
            .filter(|item| container.fits(&item.size))
            .take(top_k)
            .map(SimpleRecommendation::from)
            .collect()
    }
}

fn ensure_finite(
    item: &MenuItem,
    component: &'static str,
    value: f64,
) -> std::result::Result<(), ItemProcessingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ItemProcessingError::NonFiniteScore {
            menu_id: item.menu_id.clone(),
            component,
        })
    }
}
