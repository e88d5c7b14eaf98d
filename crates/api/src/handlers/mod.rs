pub mod auth;
pub mod calls;
pub mod campaigns;
pub mod clients;
pub mod jobs;
pub mod onboarding;
pub mod staff;
