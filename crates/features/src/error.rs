use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeatureError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Cannot prepare features for an empty catalog")]
    EmptyCatalog,

    #[error("Empty vocabulary: no n-grams found in the corpus")]
    EmptyVocabulary,

    #[error("Invalid feature configuration: {0}")]
    InvalidConfig(String),
}
