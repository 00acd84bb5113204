//! The launch feed: pagination, filtering and liked-launch reconciliation.
//!
//! ```text
//! LaunchFetcher → Normalizer → FeedController → filter::visible → FeedSnapshot
//!                                    ↕                                ↓
//!                                LikeStore                    CountdownTimers
//! ```

pub mod controller;
pub mod filter;
pub mod state;

pub use controller::{FeedConfig, FeedController};
pub use filter::{agencies, visible, FilterSpec};
pub use state::{FeedSnapshot, FeedState, FetchStatus, VisibleLaunch};
