//! Labeled training messages: the built-in sample set and CSV loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Result, TriageError},
    model::label::PriorityLabel,
    nlp::normalize::{normalize, NormalizedText},
};

/// A raw support message with its reviewed priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledMessage {
    pub message: String,
    pub priority: PriorityLabel,
}

impl LabeledMessage {
    pub fn new(message: impl Into<String>, priority: PriorityLabel) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }

    pub fn normalized(&self) -> LabeledExample {
        LabeledExample {
            text: normalize(&self.message),
            priority: self.priority,
        }
    }
}

/// Normalized text paired with its label, as consumed by the fitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledExample {
    pub text: NormalizedText,
    pub priority: PriorityLabel,
}

/// Messages used for a quick sanity check after training.
pub const PROBE_MESSAGES: [&str; 3] = [
    "Server is completely down and students cannot login",
    "Printer in room 101 is out of paper",
    "Suggestion for better food in cafeteria",
];

const SAMPLE: &[(&str, PriorityLabel)] = &[
    ("Server down completely, students cannot access online exam", PriorityLabel::High),
    ("Critical security breach detected in student database", PriorityLabel::High),
    ("Fire alarm system malfunctioning in dormitory", PriorityLabel::High),
    ("Payment system crashed, cannot process tuition payments", PriorityLabel::High),
    ("Network outage affecting entire campus", PriorityLabel::High),
    ("Emergency evacuation needed in building A", PriorityLabel::High),
    ("Database corruption, losing student records", PriorityLabel::High),
    ("Website compromised, personal data at risk", PriorityLabel::High),
    ("Heating system failed in winter dormitory", PriorityLabel::High),
    ("Critical assignment system down before deadline", PriorityLabel::High),
    ("Printer in library not working properly", PriorityLabel::Medium),
    ("WiFi connection slow in computer lab", PriorityLabel::Medium),
    ("Projector bulb needs replacement in classroom 205", PriorityLabel::Medium),
    ("Student portal login issues reported by few users", PriorityLabel::Medium),
    ("Cafeteria POS system occasionally freezing", PriorityLabel::Medium),
    ("Air conditioning unit making noise in office", PriorityLabel::Medium),
    ("Some students having trouble with course registration", PriorityLabel::Medium),
    ("Email notifications arriving with delay", PriorityLabel::Medium),
    ("Library computer runs slowly", PriorityLabel::Medium),
    ("Parking gate sensor needs calibration", PriorityLabel::Medium),
    ("Classroom whiteboard marker dried out", PriorityLabel::Medium),
    ("Online gradebook shows incorrect formatting", PriorityLabel::Medium),
    ("Request for new software installation on personal laptop", PriorityLabel::Low),
    ("Question about how to change password", PriorityLabel::Low),
    ("Suggestion to improve cafeteria menu", PriorityLabel::Low),
    ("Request for additional parking spaces", PriorityLabel::Low),
    ("Inquiry about campus tour schedule", PriorityLabel::Low),
    ("Feedback about website design preferences", PriorityLabel::Low),
    ("Request for more comfortable chairs in library", PriorityLabel::Low),
    ("Question about IT support hours", PriorityLabel::Low),
    ("Suggestion for new recreational activities", PriorityLabel::Low),
    ("Request for additional power outlets in study areas", PriorityLabel::Low),
    ("Inquiry about software training sessions", PriorityLabel::Low),
    ("General feedback about campus facilities", PriorityLabel::Low),
    ("Request for updated campus map", PriorityLabel::Low),
    ("Question about printer paper refill process", PriorityLabel::Low),
    ("Suggestion for extended library hours", PriorityLabel::Low),
];

/// Campus help-desk messages used when no corpus file is supplied.
pub fn sample_corpus() -> Vec<LabeledMessage> {
    SAMPLE
        .iter()
        .map(|(message, priority)| LabeledMessage::new(*message, *priority))
        .collect()
}

/// Read a CSV file with `message` and `priority` columns.
pub fn load_csv(path: &Path) -> Result<Vec<LabeledMessage>> {
    let corpus_err = |err: csv::Error| TriageError::Corpus(format!("{}: {err}", path.display()));
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(corpus_err)?;
    let mut messages = Vec::new();
    for row in reader.deserialize::<LabeledMessage>() {
        messages.push(row.map_err(corpus_err)?);
    }
    info!(path = %path.display(), rows = messages.len(), "loaded labeled corpus");
    Ok(messages)
}
