//! Shared application state.

use std::sync::Arc;

use stays::Database;
use tokio::sync::Mutex;

/// State shared by all request handlers.
///
/// The database connection is serialized behind an async mutex; the store's
/// own transactions provide the atomicity guarantees, the mutex only
/// arbitrates access to the single connection handle.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    /// Creates application state around an open database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Locks and returns the database handle.
    pub async fn db(&self) -> tokio::sync::MutexGuard<'_, Database> {
        self.db.lock().await
    }
}
