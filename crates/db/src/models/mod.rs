pub mod call;
pub mod campaign;
pub mod client;
pub mod job;
pub mod onboarding;
pub mod payment;
pub mod role;
pub mod session;
pub mod staff;
