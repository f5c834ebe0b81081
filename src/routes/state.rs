use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    db::{Catalog, ListStore, PgListStore, PgMovieCatalog, PgTvShowCatalog},
    models::UserId,
    services::ListService,
};

/// Shared application state
pub struct AppState {
    pub my_list: ListService,
    /// Identity injected into every request by the identity middleware
    pub default_user: UserId,
}

impl AppState {
    pub fn new(catalog: Catalog, entries: Arc<dyn ListStore>, default_user: UserId) -> Self {
        Self {
            my_list: ListService::new(catalog, entries),
            default_user,
        }
    }

    /// Wires every store to the given PostgreSQL pool
    pub fn postgres(pool: PgPool, default_user: UserId) -> Self {
        let catalog = Catalog::new(
            Arc::new(PgMovieCatalog::new(pool.clone())),
            Arc::new(PgTvShowCatalog::new(pool.clone())),
        );
        Self::new(catalog, Arc::new(PgListStore::new(pool)), default_user)
    }
}
