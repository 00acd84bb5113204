pub mod likes;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::app::Result;

pub use likes::{LikeStore, LikedSet, LIKED_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// On-device string store addressed by fixed keys.
#[async_trait]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
