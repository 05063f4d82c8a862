pub mod gateway;
pub mod metrics;
pub mod refresh;
pub mod store;
pub mod summary;
