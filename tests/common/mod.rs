#![allow(dead_code)]

use priority_triage::{
    model::label::PriorityLabel::{self, *},
    training::{self, corpus::LabeledMessage, TrainingConfig},
    ModelArtifact,
};

/// Three small buckets: outages, broken equipment, suggestions.
pub fn scenario_corpus() -> Vec<LabeledMessage> {
    let rows: [(&str, PriorityLabel); 15] = [
        ("server down", High),
        ("server down again this morning", High),
        ("the main server is down", High),
        ("server completely down urgent", High),
        ("email server down for everyone", High),
        ("printer not working", Medium),
        ("printer not working in the lab", Medium),
        ("lab printer not working properly", Medium),
        ("printer jammed and not working", Medium),
        ("the printer in the lab is not working", Medium),
        ("suggestion for menu", Low),
        ("suggestion for the cafeteria menu", Low),
        ("small suggestion for menu options", Low),
        ("menu suggestion for better food", Low),
        ("suggestion for the lunch menu", Low),
    ];
    rows.into_iter()
        .map(|(message, priority)| LabeledMessage::new(message, priority))
        .collect()
}

pub fn scenario_artifact() -> ModelArtifact {
    training::train(&scenario_corpus(), &TrainingConfig::default())
        .expect("scenario corpus trains")
        .artifact
}
