use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::store::KeyValueStore;

/// Persistence key for the liked launch ids.
pub const LIKED_KEY: &str = "likedLaunches";

/// Launch ids the user has liked. Stored as a JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikedSet(BTreeSet<String>);

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Flips membership of `id`; returns whether it is liked afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LikedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Typed load/save of the liked set over a [`KeyValueStore`].
///
/// Neither direction reports errors: an unreadable value loads as an empty
/// set and a failed write is logged and dropped.
#[derive(Clone)]
pub struct LikeStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl LikeStore {
    pub fn new(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> LikedSet {
        let raw = match self.store.get(LIKED_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return LikedSet::new(),
            Err(e) => {
                warn!(error = %e, "failed to load liked launches");
                return LikedSet::new();
            }
        };

        match serde_json::from_str::<LikedSet>(&raw) {
            Ok(liked) => {
                debug!("loaded {} liked launches", liked.len());
                liked
            }
            Err(e) => {
                warn!(error = %e, "stored liked launches are corrupt; starting empty");
                LikedSet::new()
            }
        }
    }

    pub async fn save(&self, liked: &LikedSet) {
        let encoded = match serde_json::to_string(liked) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode liked launches");
                return;
            }
        };

        if let Err(e) = self.store.set(LIKED_KEY, &encoded).await {
            warn!(error = %e, "failed to save liked launches");
        }
    }
}
