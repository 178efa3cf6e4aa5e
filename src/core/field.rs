//! Field values read by the filter engine

use serde::{Deserialize, Serialize};

/// A loosely typed field value as it arrives from imports and forms.
///
/// Records carry numbers as either JSON numbers or text (`"24"`), so the
/// evaluator coerces on read instead of trusting the stored type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    String(String),
    #[default]
    Null,
}

impl FieldValue {
    /// Get the value as text, numbers rendered without a trailing `.0`
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Coerce the value to a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::String(s) => parse_number(s),
            FieldValue::Null => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

/// Parse user-entered text as a finite number.
///
/// Blank input is not a number: an empty numeric filter matches nothing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
