use jobboard_db::companies::CompanyStore;
use jobboard_db::jobs::JobStore;
use jobboard_db::DbPool;

/// Listing defaults applied when a request omits them.
#[derive(Debug, Clone, Copy)]
pub struct ListingSettings {
    pub default_limit: usize,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_limit: jobboard_config::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Shared application state passed to every route handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub jobs: JobStore,
    pub companies: CompanyStore,
    pub listing: ListingSettings,
}

impl AppState {
    /// Build the store clients over a single pool.
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            jobs: JobStore::new(db_pool.clone()),
            companies: CompanyStore::new(db_pool),
            listing: ListingSettings::default(),
        }
    }

    pub fn with_listing(mut self, listing: ListingSettings) -> Self {
        self.listing = listing;
        self
    }
}
