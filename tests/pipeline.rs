mod common;

use std::fs;

use priority_triage::{
    model::label::PriorityLabel::{self, *},
    training::{
        self,
        corpus::{self, LabeledMessage},
        report::Evaluation,
        train_and_save, TrainingConfig, TrainingLock,
    },
    ArtifactStore, TriageError,
};
use tempfile::tempdir;

use common::{scenario_artifact, scenario_corpus};

#[test]
fn scenario_messages_land_in_expected_buckets() {
    let artifact = scenario_artifact();
    assert_eq!(artifact.predict("the server is completely down"), High);
    assert_eq!(artifact.predict("printer issue in lab"), Medium);
    assert_eq!(artifact.predict("suggestion for better food"), Low);
}

#[test]
fn training_is_reproducible() {
    let first = serde_json::to_string(&scenario_artifact()).unwrap();
    let second = serde_json::to_string(&scenario_artifact()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn saved_artifact_loads_back_identically() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("models/priority_model.json"));
    let outcome = train_and_save(&scenario_corpus(), &TrainingConfig::default(), &store).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, outcome.artifact);
    for text in ["server down", "printer jammed", "menu idea", ""] {
        assert_eq!(loaded.predict(text), outcome.artifact.predict(text));
    }
}

#[test]
fn empty_corpus_is_rejected() {
    let err = training::train(&[], &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::EmptyCorpus));
}

#[test]
fn single_label_corpus_is_rejected() {
    let corpus: Vec<LabeledMessage> = ["server down", "network down", "database down"]
        .into_iter()
        .map(|text| LabeledMessage::new(text, High))
        .collect();
    let err = training::train(&corpus, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::InsufficientClasses { found: 1 }));
}

#[test]
fn stop_word_only_corpus_is_rejected() {
    let corpus = vec![
        LabeledMessage::new("the and of", High),
        LabeledMessage::new("is it", High),
        LabeledMessage::new("!!!", Low),
        LabeledMessage::new("a an", Low),
    ];
    let err = training::train(&corpus, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::EmptyCorpus));
}

#[test]
fn failed_training_keeps_previous_artifact() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("priority_model.json"));
    let good = train_and_save(&scenario_corpus(), &TrainingConfig::default(), &store)
        .unwrap()
        .artifact;

    let bad = vec![LabeledMessage::new("server down", High)];
    assert!(train_and_save(&bad, &TrainingConfig::default(), &store).is_err());
    assert_eq!(store.load().unwrap(), good);
}

#[test]
fn report_counts_are_consistent() {
    let outcome = training::train(&scenario_corpus(), &TrainingConfig::default()).unwrap();
    let report = &outcome.report;
    assert_eq!(report.training_examples, 12);
    assert_eq!(report.evaluation_examples, 3);
    assert_eq!(report.evaluation.support, 3);
    assert_eq!(report.vocabulary_size, outcome.artifact.vectorizer().dimension());

    let metadata = outcome.artifact.metadata();
    assert_eq!(metadata.seed, TrainingConfig::default().seed);
    assert_eq!(metadata.training_examples, 12);
    assert_eq!(metadata.evaluation_examples, 3);

    let supports: usize = report.evaluation.per_class.iter().map(|m| m.support).sum();
    assert_eq!(supports, 3);
    for metrics in &report.evaluation.per_class {
        assert!((0.0..=1.0).contains(&metrics.precision));
        assert!((0.0..=1.0).contains(&metrics.recall));
    }
}

#[test]
fn sample_corpus_trains() {
    let corpus = corpus::sample_corpus();
    assert_eq!(corpus.len(), 37);
    let outcome = training::train(&corpus, &TrainingConfig::default()).unwrap();
    assert_eq!(outcome.report.training_examples, 30);
    assert_eq!(outcome.report.evaluation_examples, 7);

    let labels: Vec<PriorityLabel> = corpus::PROBE_MESSAGES
        .iter()
        .map(|text| outcome.artifact.predict(text))
        .collect();
    assert_eq!(labels.len(), 3);
}

#[test]
fn held_lock_blocks_training() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("priority_model.json"));
    let lock = TrainingLock::acquire(store.primary_path()).unwrap();
    let lock_file = lock.path().to_path_buf();
    assert!(lock_file.exists());

    let err = train_and_save(&scenario_corpus(), &TrainingConfig::default(), &store).unwrap_err();
    assert!(matches!(err, TriageError::TrainingInProgress { .. }));
    assert!(!store.primary_path().exists());

    drop(lock);
    assert!(!lock_file.exists());
    train_and_save(&scenario_corpus(), &TrainingConfig::default(), &store).unwrap();
    assert!(!lock_file.exists());
}

#[test]
fn csv_corpus_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    fs::write(
        &path,
        "message,priority\n\"Server down, again\",high\nPrinter jammed , medium\nMenu idea,low\n",
    )
    .unwrap();

    let corpus = corpus::load_csv(&path).unwrap();
    assert_eq!(
        corpus,
        vec![
            LabeledMessage::new("Server down, again", High),
            LabeledMessage::new("Printer jammed", Medium),
            LabeledMessage::new("Menu idea", Low),
        ]
    );
}

#[test]
fn csv_with_unknown_priority_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.csv");
    fs::write(&path, "message,priority\nServer down,urgent\n").unwrap();

    let err = corpus::load_csv(&path).unwrap_err();
    assert!(matches!(err, TriageError::Corpus(_)));
}

#[test]
fn evaluation_renders_as_table() {
    let evaluation = Evaluation::from_predictions(&[High, High, Low], &[High, Low, Low]);
    let rendered = evaluation.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "label       precision    recall  f1-score   support",
            "high             1.00      0.50      0.67         2",
            "medium           0.00      0.00      0.00         0",
            "low              0.50      1.00      0.67         1",
            "accuracy                             0.67         3",
            "macro avg        0.75      0.75      0.67         3",
        ]
    );
}

#[test]
fn empty_evaluation_reports_zeros() {
    let evaluation = Evaluation::from_predictions(&[], &[]);
    assert!(evaluation.is_empty());
    assert_eq!(evaluation.accuracy, 0.0);
    assert_eq!(evaluation.macro_f1, 0.0);
    assert_eq!(evaluation.class(High).unwrap().support, 0);
}
