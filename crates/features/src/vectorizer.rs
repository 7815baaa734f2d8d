use crate::error::{FeatureError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Character n-gram vectorizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Vocabulary cap (most frequent n-grams are kept)
    pub max_features: usize,
    /// Shortest n-gram length (inclusive)
    pub ngram_min: usize,
    /// Longest n-gram length (inclusive)
    pub ngram_max: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 50,
            ngram_min: 1,
            ngram_max: 3,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(FeatureError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(FeatureError::InvalidConfig(format!(
                "invalid n-gram range {}..={}",
                self.ngram_min, self.ngram_max
            )));
        }
        Ok(())
    }
}

/// TF-IDF over character n-grams with a capped vocabulary
///
/// Rows are L2-normalized, so the dot product of two rows is their cosine similarity.
#[derive(Debug, Clone)]
pub struct CharNgramVectorizer {
    config: VectorizerConfig,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Array1<f64>,
}

impl CharNgramVectorizer {
    /// Fit vocabulary and IDF on `texts`, returning the document matrix
    pub fn fit_transform(config: VectorizerConfig, texts: &[String]) -> Result<(Self, Array2<f64>)> {
        config.validate()?;

        let counts: Vec<HashMap<String, usize>> = texts
            .iter()
            .map(|text| ngram_counts(text, &config))
            .collect();

        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (gram, count) in doc {
                *corpus_freq.entry(gram.as_str()).or_insert(0) += count;
                *doc_freq.entry(gram.as_str()).or_insert(0) += 1;
            }
        }
        if corpus_freq.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(config.max_features);

        let mut vocabulary: Vec<String> = ranked.iter().map(|(gram, _)| gram.to_string()).collect();
        vocabulary.sort();
        let index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(idx, gram)| (gram.clone(), idx))
            .collect();

        let n_docs = texts.len() as f64;
        let idf = Array1::from_iter(vocabulary.iter().map(|gram| {
            let df = doc_freq.get(gram.as_str()).copied().unwrap_or(0) as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        }));

        let vectorizer = Self {
            config,
            vocabulary,
            index,
            idf,
        };

        let mut matrix = Array2::<f64>::zeros((texts.len(), vectorizer.dimension()));
        for (row, doc) in counts.iter().enumerate() {
            vectorizer.fill_row(doc, matrix.row_mut(row));
        }

        log::debug!(
            "Vectorized {} texts into {} n-gram dimensions",
            texts.len(),
            vectorizer.dimension()
        );

        Ok((vectorizer, matrix))
    }

    /// Vectorize a text with the fitted vocabulary
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let counts = ngram_counts(text, &self.config);
        let mut row = Array1::<f64>::zeros(self.dimension());
        self.fill_row(&counts, row.view_mut());
        row
    }

    fn fill_row(&self, counts: &HashMap<String, usize>, mut row: ndarray::ArrayViewMut1<'_, f64>) {
        for (gram, count) in counts {
            if let Some(&col) = self.index.get(gram) {
                row[col] = *count as f64 * self.idf[col];
            }
        }
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lowercase and squeeze whitespace runs of two or more characters into one space
fn preprocess(text: &str) -> Vec<char> {
    let lowered = text.to_lowercase();
    let mut out: Vec<char> = Vec::with_capacity(lowered.len());
    let mut run: Vec<char> = Vec::new();
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            run.push(ch);
            continue;
        }
        flush_whitespace(&mut run, &mut out);
        out.push(ch);
    }
    flush_whitespace(&mut run, &mut out);
    out
}

fn flush_whitespace(run: &mut Vec<char>, out: &mut Vec<char>) {
    match run.len() {
        0 => {}
        1 => out.push(run[0]),
        _ => out.push(' '),
    }
    run.clear();
}

fn ngram_counts(text: &str, config: &VectorizerConfig) -> HashMap<String, usize> {
    let chars = preprocess(text);
    let mut counts = HashMap::new();
    let longest = config.ngram_max.min(chars.len());
    for n in config.ngram_min..=longest {
        for window in chars.windows(n) {
            *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_all_ngram_lengths() {
        let counts = ngram_counts("abA", &VectorizerConfig::default());
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("ab"), Some(&1));
        assert_eq!(counts.get("ba"), Some(&1));
        assert_eq!(counts.get("aba"), Some(&1));
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn squeezes_whitespace_runs() {
        assert_eq!(preprocess("A  \t B"), vec!['a', ' ', 'b']);
        assert_eq!(preprocess("a b"), vec!['a', ' ', 'b']);
    }

    #[test]
    fn vocabulary_is_capped() {
        let config = VectorizerConfig {
            max_features: 4,
            ..VectorizerConfig::default()
        };
        let (vectorizer, matrix) =
            CharNgramVectorizer::fit_transform(config, &texts(&["kimchi stew", "kimbap roll"]))
                .unwrap();
        assert_eq!(vectorizer.dimension(), 4);
        assert_eq!(matrix.dim(), (2, 4));
    }

    #[test]
    fn rows_are_unit_length() {
        let (_, matrix) = CharNgramVectorizer::fit_transform(
            VectorizerConfig::default(),
            &texts(&["bulgogi Korean", "mapo tofu Chinese", "ramen Japanese"]),
        )
        .unwrap();
        for row in matrix.rows() {
            let norm = row.dot(&row).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_corpus_has_no_vocabulary() {
        let err = CharNgramVectorizer::fit_transform(VectorizerConfig::default(), &texts(&["", ""]))
            .unwrap_err();
        assert_eq!(err, FeatureError::EmptyVocabulary);
    }

    #[test]
    fn rejects_inverted_ngram_range() {
        let config = VectorizerConfig {
            ngram_min: 3,
            ngram_max: 1,
            ..VectorizerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FeatureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn transform_matches_fitted_row() {
        let corpus = texts(&["tteokbokki Korean", "fried rice Chinese"]);
        let (vectorizer, matrix) =
            CharNgramVectorizer::fit_transform(VectorizerConfig::default(), &corpus).unwrap();
        let row = vectorizer.transform(&corpus[1]);
        for (a, b) in row.iter().zip(matrix.row(1).iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
