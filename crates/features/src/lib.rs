//! # Menufit Features
//!
//! Load-time feature preparation for the recommendation engine.
//!
//! ```text
//! Catalog
//!     │
//!     ├──> name + " " + category ──> char n-gram TF-IDF ──> cosine similarity matrix
//!     │
//!     ├──> (width, length, height) ──> standardized size vectors
//!     │
//!     └──> popularity_score ──> min-max [0, 1]
//! ```
//!
//! Everything here runs once; the resulting [`FeatureSet`] is read-only.

mod error;
mod feature_set;
mod scaling;
mod similarity;
mod vectorizer;

pub use error::{FeatureError, Result};
pub use feature_set::FeatureSet;
pub use scaling::{min_max, standardize};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use vectorizer::{CharNgramVectorizer, VectorizerConfig};
