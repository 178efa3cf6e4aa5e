//! Storage implementations for the applicant service

pub mod in_memory;

pub use in_memory::InMemoryApplicantService;
