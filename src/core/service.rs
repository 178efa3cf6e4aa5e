//! Service trait for the applicant data layer

use crate::core::applicant::Applicant;
use crate::core::stage::Stage;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for reading and mutating applicants
///
/// The query engine itself only reads a snapshot from [`list`](Self::list);
/// the mutations back the bulk stage action and the delete control.
/// Implementations are free to choose any storage.
#[async_trait]
pub trait ApplicantService: Send + Sync {
    /// Register a new applicant
    async fn create(&self, applicant: Applicant) -> Result<Applicant>;

    /// Get an applicant by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Applicant>>;

    /// List all applicants in insertion order
    async fn list(&self) -> Result<Vec<Applicant>>;

    /// Move every listed applicant to `stage`
    ///
    /// Succeeds or fails as a whole: if any id is unknown nothing is
    /// updated. Returns the number of distinct applicants updated.
    async fn update_stage(&self, ids: &[Uuid], stage: Stage) -> Result<usize>;

    /// Delete an applicant
    async fn delete(&self, id: &Uuid) -> Result<()>;
}
