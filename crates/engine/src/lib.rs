//! # Menufit Engine
//!
//! Scores menu items against a container and returns ranked, explained
//! recommendations.
//!
//! ## Architecture
//!
//! ```text
//! HybridQuery
//!     │
//!     ├──> ContainerSpec validation
//!     ├──> CatalogFilter (category, price)
//!     ├──> Fit scorer (hard reject on overflow)
//!     ├──> Content score (similar items) + PreferenceModel + contextual multiplier
//!     ├──> Diversity bonus (scan order)
//!     ├──> Stable sort, truncate to min(top_k, ceiling)
//!     └──> RecommendationSet (data + metadata + explanations)
//! ```
//!
//! ## Example
//!
//! ```
//! use menufit_catalog::fallback_catalog;
//! use menufit_engine::{ContainerSpec, Engine, EngineConfig, HybridQuery};
//!
//! let engine = Engine::new(fallback_catalog(), EngineConfig::default()).unwrap();
//! let query = HybridQuery::new(ContainerSpec::new(30.0, 30.0, 12.0)).top_k(3);
//! let result = engine.hybrid(&query).unwrap();
//! assert!(result.data.len() <= 3);
//! ```

mod config;
mod container;
mod context;
mod engine;
mod error;
mod explain;
mod fit;
mod preference;
mod ranker;
mod response;
mod state;

pub use config::{ContentConfig, EngineConfig, DEFAULT_MAX_RECOMMENDATIONS};
pub use container::ContainerSpec;
pub use context::{CategoryWeights, ContextualTables, ContextualWeighter, TimeSlot, NEUTRAL_MULTIPLIER};
pub use engine::{Engine, EngineStats, HybridQuery};
pub use error::{ConfigError, EngineError, ItemProcessingError, RecommendError, Result};
pub use explain::explain;
pub use fit::{axis_ratios, balance_score, fit_score, utilization, volume_score};
pub use preference::{ConstantPreference, PreferenceFeatures, PreferenceModel, DEFAULT_PREFERENCE};
pub use ranker::{rank, DiversityTracker, RankingWeights};
pub use response::{
    round1, Recommendation, RecommendationMetadata, RecommendationResponse, RecommendationSet,
    ResponseStatus, ScoreBundle, SimpleRecommendation, ALGORITHM_VERSION,
};
pub use state::EngineState;

pub use menufit_catalog::Category;
