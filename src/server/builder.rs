//! ServerBuilder for fluent API to build the HTTP server

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::WaitlistConfig;
use crate::core::service::ApplicantService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the applicant HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_applicant_service(InMemoryApplicantService::new())
///     .with_config(WaitlistConfig::from_yaml_file("waitlist.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn ApplicantService>>,
    config: WaitlistConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            service: None,
            config: WaitlistConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the applicant service (required)
    pub fn with_applicant_service(mut self, service: impl ApplicantService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set an already shared applicant service
    pub fn with_shared_service(mut self, service: Arc<dyn ApplicantService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_config(mut self, config: WaitlistConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the applicant list, such as
    /// authentication or webhooks.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let service = self.service.take().ok_or_else(|| {
            anyhow::anyhow!("ApplicantService is required. Call .with_applicant_service()")
        })?;

        Ok(ServerHost::new(service, self.config)?)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, or to the configured `bind_addr` when `addr` is
    /// `None`, and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: Option<&str>) -> Result<()> {
        let addr = addr
            .map(str::to_string)
            .unwrap_or_else(|| self.config.bind_addr.clone());
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryApplicantService;

    #[test]
    fn test_build_without_service_fails() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("ApplicantService is required"));
    }

    #[test]
    fn test_build_with_service() {
        let result = ServerBuilder::new()
            .with_applicant_service(InMemoryApplicantService::new())
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_host_keeps_config() {
        let host = ServerBuilder::new()
            .with_applicant_service(InMemoryApplicantService::new())
            .with_config(WaitlistConfig {
                page_size: 5,
                ..Default::default()
            })
            .build_host()
            .unwrap();
        assert_eq!(host.config.page_size, 5);
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let result = ServerBuilder::new()
            .with_applicant_service(InMemoryApplicantService::new())
            .with_config(WaitlistConfig {
                export_fields: Vec::new(),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
