//! Canonical applicant pipeline stages and alias normalization
//!
//! Stage values are stored as free text and have accumulated several
//! spellings over time: legacy numeric codes, human-readable phrases and the
//! current canonical tokens. Everything that compares stages goes through
//! [`Stage::normalize`] so all of them are treated as the same stage.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// One of the five canonical pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Stage {
    Registered,
    Shortlisted,
    Interviewed,
    Approved,
    Rejected,
}

/// Returned when a stage string matches no known alias
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage: '{0}'")]
pub struct UnknownStage(pub String);

const ALIASES: &[(&str, Stage)] = &[
    ("0", Stage::Registered),
    ("registered", Stage::Registered),
    ("new", Stage::Registered),
    ("pending", Stage::Registered),
    ("applied", Stage::Registered),
    ("1", Stage::Rejected),
    ("rejected", Stage::Rejected),
    ("not interested", Stage::Rejected),
    ("declined", Stage::Rejected),
    ("withdrawn", Stage::Rejected),
    ("2", Stage::Shortlisted),
    ("shortlisted", Stage::Shortlisted),
    ("under review", Stage::Shortlisted),
    ("in review", Stage::Shortlisted),
    ("3", Stage::Interviewed),
    ("interviewed", Stage::Interviewed),
    ("interview", Stage::Interviewed),
    ("interview scheduled", Stage::Interviewed),
    ("4", Stage::Approved),
    ("approved", Stage::Approved),
    ("accepted", Stage::Approved),
    ("admitted", Stage::Approved),
    ("enrolled", Stage::Approved),
];

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Registered,
        Stage::Shortlisted,
        Stage::Interviewed,
        Stage::Approved,
        Stage::Rejected,
    ];

    /// Resolve any known spelling of a stage to its canonical value
    pub fn normalize(raw: &str) -> Option<Stage> {
        let key = alias_key(raw);
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, stage)| *stage)
    }

    /// The canonical token stored on updated records
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Registered => "registered",
            Stage::Shortlisted => "shortlisted",
            Stage::Interviewed => "interviewed",
            Stage::Approved => "approved",
            Stage::Rejected => "rejected",
        }
    }

    /// Human-readable label used in prompts and exports
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Registered => "Registered",
            Stage::Shortlisted => "Shortlisted",
            Stage::Interviewed => "Interviewed",
            Stage::Approved => "Approved",
            Stage::Rejected => "Not Interested",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::normalize(s).ok_or_else(|| UnknownStage(s.to_string()))
    }
}

impl TryFrom<String> for Stage {
    type Error = UnknownStage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Compare two raw stage values after normalization.
///
/// Values that match no alias are compared as trimmed, case-insensitive text
/// so unrecognized historical stages still filter against themselves.
pub fn stages_equal(a: &str, b: &str) -> bool {
    match (Stage::normalize(a), Stage::normalize(b)) {
        (Some(left), Some(right)) => left == right,
        (None, None) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}

fn alias_key(raw: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[\s_\-]+").unwrap());
    separators
        .replace_all(raw.trim(), " ")
        .trim()
        .to_lowercase()
}
