//! Core module containing the applicant model and the query engine

pub mod applicant;
pub mod bulk;
pub mod error;
pub mod export;
pub mod field;
pub mod filter;
pub mod query;
pub mod record;
pub mod schedule;
pub mod selection;
pub mod service;
pub mod stage;

pub use applicant::Applicant;
pub use bulk::{BulkAction, BulkActionError, BulkOutcome, BulkTarget};
pub use error::{WaitlistError, WaitlistResult};
pub use export::{DEFAULT_EXPORT_FIELDS, export_csv};
pub use field::FieldValue;
pub use filter::{
    FilterBuilder, FilterCondition, FilterField, FilterGroup, FilterOperator, Logic,
    filter_records,
};
pub use query::{ListQuery, PaginationMeta, SortOrder, TreeQuery, paginate};
pub use record::{Listed, Record};
pub use schedule::LatestOnly;
pub use selection::{ListState, ListView, ResolveOptions};
pub use service::ApplicantService;
pub use stage::{Stage, UnknownStage, stages_equal};
