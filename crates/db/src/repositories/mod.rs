pub mod call_repo;
pub mod campaign_repo;
pub mod client_repo;
pub mod job_repo;
pub mod onboarding_repo;
pub mod payment_repo;
pub mod role_repo;
pub mod session_repo;
pub mod staff_repo;

pub use call_repo::CallRepo;
pub use campaign_repo::CampaignRepo;
pub use client_repo::ClientRepo;
pub use job_repo::JobRepo;
pub use onboarding_repo::OnboardingRepo;
pub use payment_repo::PaymentRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use staff_repo::StaffRepo;

/// Default page size for list queries.
const DEFAULT_LIMIT: i64 = 50;
/// Upper bound on a single page.
const MAX_LIMIT: i64 = 200;

pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
