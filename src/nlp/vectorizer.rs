//! TF-IDF feature extraction over unigrams and bigrams.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, TriageError},
    nlp::{normalize::NormalizedText, stopwords},
};

pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// Dense TF-IDF row with one dimension per vocabulary term.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|value| *value == 0.0)
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Fitting parameters for [`VectorizerState`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// Upper bound on vocabulary size; most frequent terms win.
    pub max_features: usize,
    /// Inclusive n-gram range, `(1, 2)` for unigrams plus bigrams.
    pub ngram_range: (usize, usize),
    /// Words shorter than this are ignored.
    pub min_token_len: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: (1, 2),
            min_token_len: 2,
        }
    }
}

impl TfidfVectorizer {
    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            max_features,
            ..Self::default()
        }
    }

    /// Learn the vocabulary and smoothed IDF weights from `corpus`.
    pub fn fit(&self, corpus: &[NormalizedText]) -> Result<VectorizerState> {
        if corpus.is_empty() {
            return Err(TriageError::EmptyCorpus);
        }

        // term -> (corpus frequency, document frequency)
        let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for doc in corpus {
            let terms = extract_terms(doc, self.ngram_range, self.min_token_len);
            let mut seen = HashSet::new();
            for term in terms {
                let entry = counts.entry(term.clone()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(term) {
                    entry.1 += 1;
                }
            }
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        // BTreeMap order is alphabetical, so a stable sort keeps ties alphabetical.
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
        ranked.truncate(self.max_features);
        if ranked.is_empty() {
            return Err(TriageError::EmptyCorpus);
        }
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = corpus.len() as f64;
        let idf: IndexMap<String, f64> = ranked
            .into_iter()
            .map(|(term, (_, df))| {
                let weight = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        debug!(
            documents = corpus.len(),
            vocabulary = idf.len(),
            "fitted tf-idf vocabulary"
        );
        Ok(VectorizerState {
            ngram_range: self.ngram_range,
            min_token_len: self.min_token_len,
            idf,
        })
    }
}

/// Frozen vocabulary and IDF weights produced by [`TfidfVectorizer::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    ngram_range: (usize, usize),
    min_token_len: usize,
    /// Term -> idf; the map position is the feature index.
    idf: IndexMap<String, f64>,
}

impl VectorizerState {
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.idf.contains_key(term)
    }

    /// Vocabulary terms in feature-index order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.idf.keys().map(String::as_str)
    }

    /// Map `text` onto the frozen vocabulary. Unknown terms are dropped.
    pub fn transform(&self, text: &NormalizedText) -> FeatureVector {
        let mut row = Array1::<f64>::zeros(self.idf.len());
        for term in extract_terms(text, self.ngram_range, self.min_token_len) {
            if let Some(index) = self.idf.get_index_of(term.as_str()) {
                row[index] += 1.0;
            }
        }
        for (value, weight) in row.iter_mut().zip(self.idf.values()) {
            *value *= weight;
        }
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|value| value / norm);
        }
        FeatureVector(row)
    }

    pub fn transform_all(&self, texts: &[NormalizedText]) -> Vec<FeatureVector> {
        texts.iter().map(|text| self.transform(text)).collect()
    }
}

fn extract_terms(
    text: &NormalizedText,
    (min_n, max_n): (usize, usize),
    min_token_len: usize,
) -> Vec<String> {
    let tokens: Vec<&str> = text
        .words()
        .filter(|word| word.len() >= min_token_len && !stopwords::is_stop_word(word))
        .collect();
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}
