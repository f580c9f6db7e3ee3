pub mod releases;
pub mod sqlite;

use crate::app::Result;

pub use releases::{FeedState, ReleaseStore};
pub use sqlite::SqlitePreferenceStore;

/// Client-local key/value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
