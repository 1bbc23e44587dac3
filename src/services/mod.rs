pub mod event_gate;
pub mod ingestor;
pub mod site_resolver;
pub mod verification;
