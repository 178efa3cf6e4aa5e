//! The applicant record reviewed on the waitlist screen

use crate::core::field::FieldValue;
use crate::core::filter::FilterField;
use crate::core::record::{Listed, Record};
use crate::core::stage::Stage;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An applicant on the waitlist.
///
/// Records are created and removed by the data layer; the query engine only
/// reads them. `age` and `stage` are kept exactly as imported and coerced on
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: FieldValue,
    #[serde(default)]
    pub current_status: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub stage: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Applicant {
    /// Create a new applicant in the `registered` stage
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            age: FieldValue::Null,
            current_status: String::new(),
            batch: String::new(),
            stage: Stage::Registered.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_age(mut self, age: impl Into<FieldValue>) -> Self {
        self.age = age.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.current_status = status.into();
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = batch.into();
        self
    }

    /// Set the raw stage text as stored (aliases are kept verbatim)
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// The canonical stage, if the stored text is a known alias
    pub fn canonical_stage(&self) -> Option<Stage> {
        Stage::normalize(&self.stage)
    }

    /// Move the applicant to a stage, storing the canonical token
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage.as_str().to_string();
        self.touch();
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Flatten the record into `{field: value}` pairs for export.
    ///
    /// The stage is exported as its canonical token when it is recognized.
    pub fn to_export_row(&self) -> IndexMap<String, String> {
        let stage = self
            .canonical_stage()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| self.stage.clone());

        IndexMap::from([
            ("id".to_string(), self.id.to_string()),
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("age".to_string(), self.age.to_text()),
            ("current_status".to_string(), self.current_status.clone()),
            ("batch".to_string(), self.batch.clone()),
            ("stage".to_string(), stage),
            ("created_at".to_string(), self.created_at.to_rfc3339()),
        ])
    }
}

impl Record for Applicant {
    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: FilterField) -> FieldValue {
        match field {
            FilterField::Name => FieldValue::String(self.name.clone()),
            FilterField::Age => self.age.clone(),
            FilterField::Status => FieldValue::String(self.current_status.clone()),
            FilterField::Unknown => FieldValue::Null,
        }
    }
}

impl Listed for Applicant {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn secondary_key(&self) -> &str {
        &self.email
    }

    fn batch(&self) -> &str {
        &self.batch
    }

    fn stage(&self) -> &str {
        &self.stage
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
