use crate::error::{FeatureError, Result};
use crate::scaling::{min_max, standardize};
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::{CharNgramVectorizer, VectorizerConfig};
use menufit_catalog::Catalog;
use ndarray::{Array2, ArrayView1};

/// Per-item features derived once from the catalog
///
/// Row `i` of every matrix belongs to catalog item `i`.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    vectorizer: CharNgramVectorizer,
    content_vectors: Array2<f64>,
    similarity: SimilarityMatrix,
    normalized_sizes: Array2<f64>,
    normalized_popularity: Vec<f64>,
}

impl FeatureSet {
    /// Build content vectors, the similarity matrix, standardized sizes and
    /// min-max popularity
    pub fn prepare(catalog: &Catalog, config: VectorizerConfig) -> Result<Self> {
        if catalog.is_empty() {
            return Err(FeatureError::EmptyCatalog);
        }

        let texts: Vec<String> = catalog.items().iter().map(|item| item.content_text()).collect();
        let (vectorizer, content_vectors) = CharNgramVectorizer::fit_transform(config, &texts)?;
        let similarity = SimilarityMatrix::from_vectors(content_vectors.view());
        log::info!(
            "Content features ready: {} items x {} dimensions",
            content_vectors.nrows(),
            content_vectors.ncols()
        );

        let sizes = Array2::from_shape_fn((catalog.len(), 3), |(row, axis)| {
            catalog.items()[row].size.axes()[axis]
        });
        let normalized_sizes = standardize(sizes.view());
        log::debug!("Size features standardized");

        let popularity: Vec<f64> = catalog
            .items()
            .iter()
            .map(|item| item.popularity_score)
            .collect();
        let normalized_popularity = min_max(&popularity);
        log::debug!("Popularity features normalized");

        Ok(Self {
            vectorizer,
            content_vectors,
            similarity,
            normalized_sizes,
            normalized_popularity,
        })
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Catalog indices of the `k` items most similar to `idx`
    pub fn similar(&self, idx: usize, k: usize) -> Vec<usize> {
        self.similarity.similar(idx, k)
    }

    pub fn content_vector(&self, idx: usize) -> Option<ArrayView1<'_, f64>> {
        (idx < self.content_vectors.nrows()).then(|| self.content_vectors.row(idx))
    }

    pub fn content_dimension(&self) -> usize {
        self.content_vectors.ncols()
    }

    pub fn vocabulary(&self) -> &[String] {
        self.vectorizer.vocabulary()
    }

    /// Standardized (width, length, height)
    pub fn normalized_size(&self, idx: usize) -> Option<[f64; 3]> {
        (idx < self.normalized_sizes.nrows()).then(|| {
            let row = self.normalized_sizes.row(idx);
            [row[0], row[1], row[2]]
        })
    }

    pub fn normalized_popularity(&self, idx: usize) -> Option<f64> {
        self.normalized_popularity.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.content_vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.content_vectors.nrows() == 0
    }
}
