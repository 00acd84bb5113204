//! # launch-atlas
//!
//! A feed of upcoming space launches with favourites and live countdowns.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → FeedController → Filter → Snapshot → CLI
//!                             ↕                        ↓
//!                        LikeStore (kv)          CountdownTimers
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the next launches
//! launch-atlas list
//!
//! # Only NASA launches, two pages deep
//! launch-atlas list --agency NASA --pages 2
//!
//! # Like a launch, then show liked launches only
//! launch-atlas like <launch-id>
//! launch-atlas list --liked
//!
//! # Live countdowns
//! launch-atlas watch
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the
/// key-value store and the fetcher, and hands out feed controllers.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/launch-atlas/config.toml`.
pub mod config;

/// Countdown formatting and per-launch repeating timers.
pub mod countdown;

/// Core domain models.
///
/// - [`LaunchRecord`](domain::LaunchRecord): one upcoming launch
/// - [`ActionLink`](domain::ActionLink): the single outbound link shown for it
pub mod domain;

/// The feed controller, filter engine and snapshot types.
pub mod feed;

/// HTTP access to the upstream launch listing.
///
/// - [`LaunchFetcher`](fetcher::LaunchFetcher): async trait for page fetches
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Upstream JSON pages to [`LaunchRecord`](domain::LaunchRecord)s.
pub mod normalizer;

/// Key-value persistence and the liked-launch adapter.
///
/// - [`KeyValueStore`](store::KeyValueStore): async get/set trait
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`LikeStore`](store::LikeStore): typed load/save of the liked set
pub mod store;
