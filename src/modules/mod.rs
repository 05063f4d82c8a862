pub mod countries;
pub mod error;
pub mod metrics;
pub mod status;
