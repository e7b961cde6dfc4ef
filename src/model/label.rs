//! Priority tiers and their ordering.

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority assigned to a support message.
///
/// Variants are declared from least to most urgent so the derived `Ord`
/// gives `High > Medium > Low`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLabel {
    Low,
    #[default]
    Medium,
    High,
}

impl PriorityLabel {
    pub const ALL: [PriorityLabel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Dense class index used for the classifier targets.
    pub fn index(&self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lenient parse for stored values; anything unrecognised counts as medium.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}', expected one of low, medium, high")]
pub struct UnknownPriority(pub String);

impl FromStr for PriorityLabel {
    type Err = UnknownPriority;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

/// Stable sort putting the most urgent items first.
pub fn sort_by_urgency<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> PriorityLabel,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}
