use std::sync::Arc;

use menufit_catalog::Catalog;

use crate::config::EngineConfig;
use crate::container::ContainerSpec;
use crate::engine::{Engine, EngineStats, HybridQuery};
use crate::error::{RecommendError, Result};
use crate::response::{RecommendationSet, SimpleRecommendation};

/// Process-wide engine handle: ready, or permanently unavailable after a failed build
#[derive(Debug, Clone)]
pub enum EngineState {
    Ready(Arc<Engine>),
    Unavailable { reason: String },
}

impl EngineState {
    /// Build the engine, recording the failure instead of propagating it
    pub fn initialize(catalog: Catalog, config: EngineConfig) -> Self {
        match Engine::new(catalog, config) {
            Ok(engine) => Self::Ready(Arc::new(engine)),
            Err(err) => {
                log::error!("Recommendation engine initialization failed: {err}");
                Self::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn engine(&self) -> Result<&Arc<Engine>> {
        match self {
            Self::Ready(engine) => Ok(engine),
            Self::Unavailable { reason } => Err(RecommendError::Unavailable(reason.clone())),
        }
    }

    pub fn hybrid(&self, query: &HybridQuery) -> Result<RecommendationSet> {
        self.engine()?.hybrid(query)
    }

    pub fn simple(&self, container: &ContainerSpec, top_k: usize) -> Result<Vec<SimpleRecommendation>> {
        Ok(self.engine()?.simple(container, top_k))
    }

    /// Counters, `None` while unavailable
    pub fn stats(&self) -> Option<EngineStats> {
        self.engine().ok().map(|engine| engine.stats())
    }
}

impl From<Engine> for EngineState {
    fn from(engine: Engine) -> Self {
        Self::Ready(Arc::new(engine))
    }
}
