//! # Waitlist-RS
//!
//! Applicant waitlist review service built around a composable boolean
//! query engine.
//!
//! ## Features
//!
//! - **Filter Trees**: Nested AND/OR groups of field conditions, edited immutably
//! - **Loose Matching**: Case-insensitive text, numeric comparison on parsable values
//! - **Stage Normalization**: Legacy codes and display labels map onto canonical stages
//! - **List Views**: Search, batch and stage filters, sort, selection and pagination
//! - **Bulk Review**: Confirmed stage changes applied in a single mutation
//! - **CSV Export**: Selected applicants and columns
//! - **Configuration-Based**: Page sizes and export columns via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waitlist::prelude::*;
//!
//! let applicants = vec![
//!     Applicant::new("Abel", "abel@example.com").with_age(24.0),
//!     Applicant::new("Sara", "sara@example.com").with_age(31.0),
//! ];
//!
//! let mut builder = FilterBuilder::new();
//! let id = builder.add_condition(builder.root_id()).unwrap();
//! builder.update_condition(FilterCondition {
//!     id,
//!     field: FilterField::Age,
//!     operator: FilterOperator::GreaterThan,
//!     value: "25".to_string(),
//! });
//!
//! let matched = filter_records(&applicants, builder.root());
//! assert_eq!(matched.len(), 1);
//! ```

pub mod applicants;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Install a `tracing` subscriber filtered by `RUST_LOG`
///
/// Falls back to `info` for this crate when `RUST_LOG` is unset. Intended
/// for binaries; the library never installs a subscriber on its own.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("waitlist=info,tower_http=info"));

    // A subscriber may already be installed by the host application.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model ===
    pub use crate::core::{
        Applicant, FieldValue, Listed, Record, Stage, UnknownStage, stages_equal,
    };

    // === Query Engine ===
    pub use crate::core::filter::{
        FilterBuilder, FilterCondition, FilterField, FilterGroup, FilterOperator, Logic,
        filter_records, matches_condition, matches_group, tree,
    };
    pub use crate::core::query::{
        ListQuery, PaginationMeta, SortKey, SortOrder, TreeQuery, paginate,
    };
    pub use crate::core::schedule::LatestOnly;
    pub use crate::core::selection::{ListState, ListView, ResolveOptions};

    // === Review ===
    pub use crate::core::bulk::{BulkAction, BulkActionError, BulkOutcome, BulkTarget};
    pub use crate::core::export::{DEFAULT_EXPORT_FIELDS, export_csv};

    // === Errors ===
    pub use crate::core::error::{WaitlistError, WaitlistResult};

    // === Service & Storage ===
    pub use crate::core::service::ApplicantService;
    pub use crate::storage::InMemoryApplicantService;

    // === Config ===
    pub use crate::config::WaitlistConfig;

    // === Server ===
    pub use crate::applicants::AppState;
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
