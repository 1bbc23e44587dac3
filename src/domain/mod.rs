pub mod audit;
pub mod error;
pub mod event;
pub mod id;
pub mod lookup;
pub mod money;
pub mod persisted;
pub mod site;
pub mod store;
