//! Bulk stage action with a confirmation step
//!
//! The review screen lets a reviewer pick rows and a target stage, then shows
//! a confirmation naming how many applicants move and where. Confirming calls
//! the mutation exactly once. A failed mutation leaves the confirmation open
//! with the same targets so the reviewer can retry without re-selecting.

use crate::core::service::ApplicantService;
use crate::core::stage::Stage;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The selection awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkTarget {
    pub ids: Vec<Uuid>,
    pub stage: Stage,
}

impl BulkTarget {
    /// Confirmation text naming the count and target stage
    pub fn prompt(&self) -> String {
        let noun = if self.ids.len() == 1 {
            "applicant"
        } else {
            "applicants"
        };
        format!(
            "Move {} {} to {}?",
            self.ids.len(),
            noun,
            self.stage.label()
        )
    }
}

/// Result of a confirmed bulk action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub updated: usize,
    pub stage: Stage,
}

#[derive(Debug, Error)]
pub enum BulkActionError {
    #[error("no bulk action is awaiting confirmation")]
    NothingPending,

    #[error("select at least one applicant")]
    EmptySelection,

    #[error("stage update failed: {0}")]
    Mutation(anyhow::Error),
}

/// Confirmation state for one bulk stage change
#[derive(Debug, Default)]
pub struct BulkAction {
    pending: Option<BulkTarget>,
}

impl BulkAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the confirmation for `ids` (duplicates dropped, order kept)
    pub fn request(
        &mut self,
        ids: Vec<Uuid>,
        stage: Stage,
    ) -> Result<&BulkTarget, BulkActionError> {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Err(BulkActionError::EmptySelection);
        }

        Ok(&*self.pending.insert(BulkTarget { ids: unique, stage }))
    }

    pub fn pending(&self) -> Option<&BulkTarget> {
        self.pending.as_ref()
    }

    /// Whether the confirmation is showing
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Run the mutation once for the pending target
    pub async fn confirm<S>(&mut self, service: &S) -> Result<BulkOutcome, BulkActionError>
    where
        S: ApplicantService + ?Sized,
    {
        let target = self.pending.as_ref().ok_or(BulkActionError::NothingPending)?;

        match service.update_stage(&target.ids, target.stage).await {
            Ok(updated) => {
                tracing::info!(updated, stage = %target.stage, "bulk stage update applied");
                let outcome = BulkOutcome {
                    updated,
                    stage: target.stage,
                };
                self.pending = None;
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    count = target.ids.len(),
                    stage = %target.stage,
                    error = %e,
                    "bulk stage update failed"
                );
                Err(BulkActionError::Mutation(e))
            }
        }
    }
}
