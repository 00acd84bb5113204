use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::countdown::{CountdownTick, CountdownTimers};
use crate::domain::ActionLink;
use crate::feed::filter::{self, FilterSpec};
use crate::feed::state::{FeedSnapshot, FeedState, FetchStatus, VisibleLaunch};
use crate::fetcher::LaunchFetcher;
use crate::normalizer::Normalizer;
use crate::store::{LikeStore, LikedSet};

/// Paging and retry knobs for a [`FeedController`].
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub page_size: usize,
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
    pub fallback_search_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for FeedConfig {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.api.page_size,
            max_retries: config.api.max_retries,
            retry_delay: config.api.retry_delay(),
            fallback_search_url: config.links.fallback_search_url.clone(),
        }
    }
}

struct Inner {
    state: FeedState,
    liked: LikedSet,
    filter: FilterSpec,
    refreshing: bool,
    notice: Option<String>,
    timers: CountdownTimers,
}

/// Owns the launch feed for one open screen.
///
/// At most one fetch runs at a time; a call made while another is in flight
/// returns immediately. Every change is pushed to subscribers as a
/// [`FeedSnapshot`]. After [`dispose`](FeedController::dispose) late fetch
/// results are dropped and nothing more is published.
pub struct FeedController {
    fetcher: Arc<dyn LaunchFetcher + Send + Sync>,
    normalizer: Normalizer,
    likes: LikeStore,
    config: FeedConfig,
    inner: Mutex<Inner>,
    live: AtomicBool,
    updates: watch::Sender<FeedSnapshot>,
}

impl FeedController {
    pub fn new(
        fetcher: Arc<dyn LaunchFetcher + Send + Sync>,
        likes: LikeStore,
        config: FeedConfig,
    ) -> Self {
        let (updates, _) = watch::channel(FeedSnapshot::default());
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            likes,
            config,
            inner: Mutex::new(Inner {
                state: FeedState::default(),
                liked: LikedSet::new(),
                filter: FilterSpec::default(),
                refreshing: false,
                notice: None,
                timers: CountdownTimers::new(),
            }),
            live: AtomicBool::new(true),
            updates,
        }
    }

    /// Loads the liked set, then fetches the first page.
    pub async fn initialize(&self) {
        self.load_likes().await;
        self.fetch_page(true).await;
    }

    /// Replaces the in-memory liked set with the persisted one.
    pub async fn load_likes(&self) {
        let liked = self.likes.load().await;
        if !self.is_live() {
            return;
        }
        self.lock().liked = liked;
        self.recompute();
    }

    /// Fetches one page, retrying failures with a fixed delay.
    ///
    /// `reset` replaces the feed with the first page; otherwise the page at
    /// the cursor is appended. Exhausted retries end in
    /// [`FetchStatus::Failed`] with a notice, and a failed reset also
    /// empties the feed.
    pub async fn fetch_page(&self, reset: bool) {
        let offset = {
            let mut inner = self.lock();
            if !self.is_live() {
                return;
            }
            if inner.state.status.is_in_flight() {
                debug!(reset, "fetch already in flight; ignoring");
                return;
            }
            inner.state.status = FetchStatus::Loading;
            inner.state.retry_count = 0;
            inner.refreshing = reset;
            if reset {
                0
            } else {
                inner.state.next_offset
            }
        };
        self.recompute();

        loop {
            let result = self.fetcher.fetch_page(self.config.page_size, offset).await;
            if !self.is_live() {
                debug!(offset, "controller disposed; dropping fetch result");
                return;
            }

            let err = match result {
                Ok(body) => {
                    self.apply_page(reset, offset, &body);
                    return;
                }
                Err(e) => e,
            };

            let attempt = {
                let mut inner = self.lock();
                if inner.state.retry_count < self.config.max_retries {
                    inner.state.retry_count += 1;
                    inner.state.status = FetchStatus::Retrying;
                    Some(inner.state.retry_count)
                } else {
                    None
                }
            };

            match attempt {
                Some(attempt) => {
                    warn!(
                        offset,
                        error = %err,
                        "Retry {}/{} after {:?}",
                        attempt,
                        self.config.max_retries,
                        self.config.retry_delay
                    );
                    self.recompute();
                    tokio::time::sleep(self.config.retry_delay).await;
                    if !self.is_live() {
                        debug!(offset, "controller disposed during retry delay");
                        return;
                    }
                }
                None => {
                    self.fail(reset, &err.to_string());
                    return;
                }
            }
        }
    }

    /// Same as `fetch_page(true)`.
    pub async fn refresh(&self) {
        self.fetch_page(true).await;
    }

    /// Same as `fetch_page(false)`.
    pub async fn load_more(&self) {
        self.fetch_page(false).await;
    }

    /// Flips `id` in the liked set and persists the whole set.
    ///
    /// Returns whether the launch is liked afterwards. A failed save keeps
    /// the in-memory change.
    pub async fn toggle_like(&self, id: &str) -> bool {
        if !self.is_live() {
            return false;
        }
        let (now_liked, liked) = {
            let mut inner = self.lock();
            let now_liked = inner.liked.toggle(id);
            (now_liked, inner.liked.clone())
        };
        debug!(id, now_liked, "toggled like");
        self.recompute();
        self.likes.save(&liked).await;
        now_liked
    }

    /// Replaces the filter. Never fetches.
    pub fn set_filter(&self, spec: FilterSpec) {
        if !self.is_live() {
            return;
        }
        self.lock().filter = spec;
        self.recompute();
    }

    /// Receives the current snapshot and every later one. Drop to unsubscribe.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.updates.subscribe()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.updates.borrow().clone()
    }

    /// Countdown updates for the launches currently visible.
    pub fn countdowns(&self) -> broadcast::Receiver<CountdownTick> {
        self.lock().timers.subscribe()
    }

    /// Ids whose countdown timer is running.
    pub fn active_countdowns(&self) -> Vec<String> {
        self.lock().timers.active_ids()
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Tears the controller down: stops all timers and ignores late results.
    pub fn dispose(&self) {
        self.live.store(false, Ordering::SeqCst);
        self.lock().timers.stop_all();
        debug!("feed controller disposed");
    }

    fn apply_page(&self, reset: bool, offset: usize, body: &[u8]) {
        let page = self.normalizer.normalize(body);
        info!(offset, reset, count = page.len(), "loaded launch page");
        {
            let mut inner = self.lock();
            if reset {
                inner.state.items = page;
            } else {
                inner.state.items.extend(page);
                inner.state.next_offset = offset + self.config.page_size;
            }
            inner.state.status = FetchStatus::Idle;
            inner.state.retry_count = 0;
            inner.refreshing = false;
            inner.notice = None;
        }
        self.recompute();
    }

    fn fail(&self, reset: bool, reason: &str) {
        let attempts = self.config.max_retries + 1;
        error!(reset, attempts, "giving up on launch page: {}", reason);
        {
            let mut inner = self.lock();
            inner.state.status = FetchStatus::Failed;
            inner.refreshing = false;
            inner.notice = Some(format!(
                "Failed to load launches after {} attempts: {}",
                attempts, reason
            ));
            if reset {
                inner.state.items.clear();
            }
        }
        self.recompute();
    }

    /// Derives the visible set, reconciles countdown timers and notifies
    /// subscribers.
    fn recompute(&self) {
        if !self.is_live() {
            return;
        }
        let snapshot = {
            let mut inner = self.lock();
            let snapshot = self.build_snapshot(&inner);
            inner.timers.sync(
                snapshot
                    .visible
                    .iter()
                    .map(|v| (v.launch.id.as_str(), v.launch.scheduled_time)),
            );
            snapshot
        };
        self.updates.send_replace(snapshot);
    }

    fn build_snapshot(&self, inner: &Inner) -> FeedSnapshot {
        let visible = filter::visible(&inner.state.items, &inner.liked, &inner.filter)
            .into_iter()
            .map(|launch| VisibleLaunch {
                liked: inner.liked.contains(&launch.id),
                action: ActionLink::resolve(launch, &self.config.fallback_search_url),
                launch: launch.clone(),
            })
            .collect();

        FeedSnapshot {
            state: inner.state.clone(),
            visible,
            agencies: filter::agencies(&inner.state.items),
            filter: inner.filter.clone(),
            liked: inner.liked.clone(),
            is_refreshing: inner.refreshing,
            notice: inner.notice.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }
}
