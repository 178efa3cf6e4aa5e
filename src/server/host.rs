//! Server host holding the state every exposure needs
//!
//! The host is agnostic to the transport protocol and is the single source
//! of truth for the application state.

use crate::applicants::AppState;
use crate::config::WaitlistConfig;
use crate::core::error::WaitlistResult;
use crate::core::service::ApplicantService;
use std::sync::Arc;

/// Host context containing the service and its configuration
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<WaitlistConfig>,

    /// Applicant data layer
    pub service: Arc<dyn ApplicantService>,
}

impl ServerHost {
    /// Build the host, validating the configuration first
    pub fn new(service: Arc<dyn ApplicantService>, config: WaitlistConfig) -> WaitlistResult<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            service,
        })
    }

    /// Axum state shared by the applicant handlers
    pub fn app_state(&self) -> AppState {
        AppState::new(self.service.clone(), self.config.clone())
    }
}
