//! Domain logic for the opsdesk backend.
//!
//! Pure types and rules shared by the db and api crates: the error taxonomy,
//! staff roles, subscription plans, the onboarding workflow transition table,
//! and job-status bucket matching. No I/O lives here.

pub mod error;
pub mod job_status;
pub mod plan;
pub mod roles;
pub mod types;
pub mod workflow;
