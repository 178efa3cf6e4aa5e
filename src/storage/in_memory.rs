//! In-memory implementation of ApplicantService for testing and development

use crate::core::error::{ApplicantError, StorageError, WaitlistError};
use crate::core::{Applicant, ApplicantService, Stage};
use anyhow::Result;
use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory applicant service implementation
///
/// Keeps applicants in insertion order so unsorted lists are stable.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryApplicantService {
    applicants: Arc<RwLock<IndexMap<Uuid, Applicant>>>,
}

impl InMemoryApplicantService {
    /// Create a new in-memory applicant service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service pre-populated with `applicants`
    pub fn with_applicants(applicants: impl IntoIterator<Item = Applicant>) -> Self {
        let map = applicants.into_iter().map(|a| (a.id, a)).collect();
        Self {
            applicants: Arc::new(RwLock::new(map)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, Applicant>>> {
        self.applicants.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, Applicant>>> {
        self.applicants.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("write lock: {}", e),
            }
            .into()
        })
    }
}

fn not_found(id: Uuid) -> anyhow::Error {
    WaitlistError::from(ApplicantError::NotFound { id }).into()
}

#[async_trait]
impl ApplicantService for InMemoryApplicantService {
    async fn create(&self, applicant: Applicant) -> Result<Applicant> {
        let mut applicants = self.write()?;

        if applicants.contains_key(&applicant.id) {
            let conflict = ApplicantError::AlreadyExists { id: applicant.id };
            return Err(WaitlistError::from(conflict).into());
        }
        applicants.insert(applicant.id, applicant.clone());

        Ok(applicant)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Applicant>> {
        let applicants = self.read()?;
        Ok(applicants.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Applicant>> {
        let applicants = self.read()?;
        Ok(applicants.values().cloned().collect())
    }

    async fn update_stage(&self, ids: &[Uuid], stage: Stage) -> Result<usize> {
        let mut applicants = self.write()?;

        // Check every id first so a bad one leaves the rest untouched.
        if let Some(missing) = ids.iter().find(|id| !applicants.contains_key(*id)) {
            return Err(not_found(*missing));
        }

        let unique: IndexSet<&Uuid> = ids.iter().collect();
        for id in &unique {
            if let Some(applicant) = applicants.get_mut(*id) {
                applicant.set_stage(stage);
            }
        }

        Ok(unique.len())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut applicants = self.write()?;

        applicants.shift_remove(id).ok_or_else(|| not_found(*id))?;
        tracing::debug!(%id, "applicant deleted");

        Ok(())
    }
}
