//! Text preparation: normalization and TF-IDF feature extraction.

pub mod normalize;
pub mod stopwords;
pub mod vectorizer;

pub use normalize::{normalize, NormalizedText};
pub use vectorizer::{FeatureVector, TfidfVectorizer, VectorizerState};
