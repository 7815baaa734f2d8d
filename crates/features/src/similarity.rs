use ndarray::{Array2, ArrayView2, Axis};

/// Cosine similarity between two vectors (0 when either is zero or lengths differ)
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Precomputed pairwise cosine similarity over item vectors
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Build from a row-per-item matrix
    pub fn from_vectors(vectors: ArrayView2<'_, f64>) -> Self {
        let norms = vectors.map_axis(Axis(1), |row| row.dot(&row).sqrt());
        let mut scores = vectors.dot(&vectors.t());
        for ((i, j), value) in scores.indexed_iter_mut() {
            let denom = norms[i] * norms[j];
            *value = if denom > 0.0 { *value / denom } else { 0.0 };
        }
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.nrows() == 0
    }

    pub fn score(&self, a: usize, b: usize) -> Option<f64> {
        self.scores.get((a, b)).copied()
    }

    /// The `k` items most similar to `idx`, excluding `idx` itself
    ///
    /// Ties keep catalog order. An out-of-range index yields no neighbours.
    pub fn similar(&self, idx: usize, k: usize) -> Vec<usize> {
        if idx >= self.len() {
            return Vec::new();
        }

        let mut neighbours: Vec<(usize, f64)> = self
            .scores
            .row(idx)
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != idx)
            .map(|(other, score)| (other, *score))
            .collect();
        neighbours.sort_by(|a, b| b.1.total_cmp(&a.1));
        neighbours.into_iter().take(k).map(|(other, _)| other).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn cosine_handles_degenerate_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let vectors = array![[1.0, 0.0], [0.6, 0.8], [0.0, 1.0]];
        let matrix = SimilarityMatrix::from_vectors(vectors.view());
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert!((matrix.score(i, i).unwrap() - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert_eq!(matrix.score(i, j), matrix.score(j, i));
            }
        }
    }

    #[test]
    fn similar_excludes_self_and_orders_by_score() {
        let vectors = array![[1.0, 0.0], [0.0, 1.0], [0.9, 0.1], [0.6, 0.8]];
        let matrix = SimilarityMatrix::from_vectors(vectors.view());
        assert_eq!(matrix.similar(0, 2), vec![2, 3]);
        assert_eq!(matrix.similar(0, 10).len(), 3);
        assert!(matrix.similar(4, 5).is_empty());
    }

    #[test]
    fn ties_keep_catalog_order() {
        let vectors = array![[1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [0.0, 1.0]];
        let matrix = SimilarityMatrix::from_vectors(vectors.view());
        assert_eq!(matrix.similar(0, 3), vec![1, 2, 3]);
    }
}
