use crate::context::ContextualTables;
use crate::error::ConfigError;
use crate::ranker::RankingWeights;
use menufit_features::VectorizerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on returned recommendations
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Content-similarity settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    #[serde(flatten)]
    pub vectorizer: VectorizerConfig,

    /// Neighbours counted for the content score
    pub similar_k: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            similar_k: 5,
        }
    }
}

/// Engine configuration, loadable from TOML; every field has a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of recommendations ever returned
    pub max_recommendations: usize,

    pub content: ContentConfig,

    pub weights: RankingWeights,

    pub contextual: ContextualTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            content: ContentConfig::default(),
            weights: RankingWeights::default(),
            contextual: ContextualTables::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recommendations == 0 {
            return Err(ConfigError::Invalid(
                "max_recommendations must be at least 1".to_string(),
            ));
        }
        self.content.vectorizer.validate()?;

        let weights = [
            self.weights.fit,
            self.weights.preference,
            self.weights.content,
            self.weights.popularity,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::Invalid(
                "ranking weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
