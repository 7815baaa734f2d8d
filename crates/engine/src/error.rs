use menufit_features::FeatureError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Engine construction failure; the engine stays unavailable for the process lifetime
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Feature preparation failed: {0}")]
    Features(#[from] FeatureError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<FeatureError> for ConfigError {
    fn from(err: FeatureError) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// Per-call recommendation failures, reported as structured results
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("AI model unavailable: {0}")]
    Unavailable(String),

    #[error("invalid size: container dimensions must be greater than 0 (got {width}x{length}x{height})")]
    InvalidSize { width: f64, length: f64, height: f64 },

    #[error("invalid top_k: {requested} (must be between 1 and {max})")]
    InvalidTopK { requested: usize, max: usize },

    #[error("no matching items for the given conditions")]
    NoMatchingItems,
}

impl RecommendError {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::InvalidSize { .. } => "invalid_size",
            Self::InvalidTopK { .. } => "invalid_top_k",
            Self::NoMatchingItems => "no_matching_items",
        }
    }
}

/// Failure while scoring a single item; the item is skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemProcessingError {
    #[error("menu {menu_id}: non-finite {component} score")]
    NonFiniteScore {
        menu_id: String,
        component: &'static str,
    },
}
