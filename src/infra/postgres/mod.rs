pub mod audit_repo;
pub mod event_repo;
pub mod payment_repo;
