mod memory;

pub use memory::InMemoryStore;

use std::sync::Arc;

use crate::config::DbPool;
use crate::modules::countries::{crud::CountryCrud, interface::CountryRepository};
use crate::modules::status::{crud::StatusCrud, interface::StatusRepository};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The two repositories every handler works against.
#[derive(Clone)]
pub struct Store {
    pub countries: Arc<dyn CountryRepository>,
    pub statuses: Arc<dyn StatusRepository>,
}

impl Store {
    pub fn mysql(pool: DbPool) -> Self {
        Self {
            countries: Arc::new(CountryCrud::new(pool.clone())),
            statuses: Arc::new(StatusCrud::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            countries: store.clone(),
            statuses: store,
        }
    }
}
