//! Application state shared by all handlers.

use std::sync::Arc;

use crate::content::ContentLoader;
use crate::db::DbPool;
use crate::progress::{ProgressStore, SqliteProgressStore};

/// Progress store shared across request tasks
pub type SharedProgressStore = Arc<dyn ProgressStore + Send + Sync>;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Catalog over the configured content root
  pub loader: Arc<ContentLoader>,

  pub progress: SharedProgressStore,
}

impl AppState {
  pub fn new(loader: ContentLoader, progress: SharedProgressStore) -> Self {
    Self {
      loader: Arc::new(loader),
      progress,
    }
  }

  /// State backed by the SQLite progress store
  pub fn with_db(loader: ContentLoader, pool: DbPool) -> Self {
    Self::new(loader, Arc::new(SqliteProgressStore::new(pool)))
  }
}
