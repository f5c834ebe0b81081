pub mod catalog;
pub mod list_store;
pub mod memory;
pub mod postgres;

pub use catalog::{Catalog, CatalogAccessor};
pub use list_store::ListStore;
pub use memory::{InMemoryCatalog, InMemoryListStore};
pub use postgres::{create_pool, run_migrations, PgListStore, PgMovieCatalog, PgTvShowCatalog};
