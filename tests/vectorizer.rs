use priority_triage::{
    nlp::vectorizer::{TfidfVectorizer, VectorizerState},
    normalize, NormalizedText, TriageError,
};

fn corpus(texts: &[&str]) -> Vec<NormalizedText> {
    texts.iter().map(|text| normalize(text)).collect()
}

fn weight(state: &VectorizerState, text: &str, term: &str) -> f64 {
    let index = state
        .vocabulary()
        .position(|candidate| candidate == term)
        .expect("term in vocabulary");
    state.transform(&normalize(text)).get(index).unwrap()
}

#[test]
fn vocabulary_holds_unigrams_and_bigrams_without_stop_words() {
    let state = TfidfVectorizer::default()
        .fit(&corpus(&["The printer is not working", "Server down!"]))
        .unwrap();
    for term in ["printer", "not working", "printer not", "server down", "down"] {
        assert!(state.contains(term), "missing {term}");
    }
    assert!(!state.contains("the"));
    assert!(!state.contains("is"));
}

#[test]
fn max_features_keeps_most_frequent_terms() {
    let state = TfidfVectorizer::with_max_features(3)
        .fit(&corpus(&["server down", "server down again", "server slow"]))
        .unwrap();
    assert_eq!(state.dimension(), 3);
    let vocabulary: Vec<&str> = state.vocabulary().collect();
    assert_eq!(vocabulary, vec!["down", "server", "server down"]);
}

#[test]
fn transform_matches_fitted_dimension() {
    let state = TfidfVectorizer::default()
        .fit(&corpus(&["printer jammed", "wifi slow in lab"]))
        .unwrap();
    for text in ["printer", "", "something else entirely", "wifi wifi wifi"] {
        assert_eq!(state.transform(&normalize(text)).dimension(), state.dimension());
    }
}

#[test]
fn unseen_terms_give_zero_vector() {
    let state = TfidfVectorizer::default()
        .fit(&corpus(&["printer jammed", "server down"]))
        .unwrap();
    let features = state.transform(&normalize("completely unrelated words"));
    assert!(features.is_zero());
    assert!(state.transform(&normalize("")).is_zero());
}

#[test]
fn rows_are_unit_length() {
    let state = TfidfVectorizer::default()
        .fit(&corpus(&["server down", "server slow", "printer down"]))
        .unwrap();
    let features = state.transform(&normalize("server down server"));
    let norm: f64 = features.as_array().iter().map(|v| v * v).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-12);
}

#[test]
fn idf_downweights_terms_found_everywhere() {
    let state = TfidfVectorizer::default()
        .fit(&corpus(&["server down", "server slow", "server crash"]))
        .unwrap();
    let common = weight(&state, "server down", "server");
    let rare = weight(&state, "server down", "down");
    assert!(rare > common, "down={rare} server={common}");
}

#[test]
fn empty_corpus_is_rejected() {
    let err = TfidfVectorizer::default().fit(&[]).unwrap_err();
    assert!(matches!(err, TriageError::EmptyCorpus));
}

#[test]
fn stop_word_only_corpus_is_rejected() {
    let err = TfidfVectorizer::default()
        .fit(&corpus(&["the and of", "!!!", ""]))
        .unwrap_err();
    assert!(matches!(err, TriageError::EmptyCorpus));
}

#[test]
fn fitting_is_deterministic() {
    let texts = corpus(&["wifi slow", "printer not working", "server down again"]);
    let first = TfidfVectorizer::default().fit(&texts).unwrap();
    let second = TfidfVectorizer::default().fit(&texts).unwrap();
    assert_eq!(first, second);
}
