//! Server module for building the applicant HTTP service
//!
//! This module provides a `ServerBuilder` that registers:
//! - Health check routes
//! - Applicant list, query, review and export routes
//! - Any custom routes supplied by the caller

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
