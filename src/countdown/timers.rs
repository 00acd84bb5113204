use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::countdown;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const TICK_CHANNEL_CAPACITY: usize = 256;

/// A freshly computed countdown for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTick {
    pub id: String,
    pub display: String,
}

struct Timer {
    target: DateTime<Utc>,
    task: JoinHandle<()>,
}

/// One repeating timer per displayed launch.
///
/// A timer starts when its launch enters the displayed set passed to
/// [`sync`](CountdownTimers::sync) and is aborted when it leaves. Dropping
/// the collection aborts everything.
pub struct CountdownTimers {
    ticks: broadcast::Sender<CountdownTick>,
    timers: HashMap<String, Timer>,
}

impl Default for CountdownTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimers {
    pub fn new() -> Self {
        let (ticks, _) = broadcast::channel(TICK_CHANNEL_CAPACITY);
        Self {
            ticks,
            timers: HashMap::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CountdownTick> {
        self.ticks.subscribe()
    }

    /// Reconciles running timers with the launches now on screen.
    ///
    /// Must be called from within a tokio runtime when anything new is shown.
    pub fn sync<'a, I>(&mut self, displayed: I)
    where
        I: IntoIterator<Item = (&'a str, DateTime<Utc>)>,
    {
        let wanted: HashMap<&str, DateTime<Utc>> = displayed.into_iter().collect();

        self.timers.retain(|id, timer| {
            let keep = wanted.get(id.as_str()) == Some(&timer.target);
            if !keep {
                debug!(id = %id, "stopping countdown timer");
                timer.task.abort();
            }
            keep
        });

        for (id, target) in wanted {
            if !self.timers.contains_key(id) {
                let task = self.spawn_timer(id.to_string(), target);
                self.timers.insert(id.to_string(), Timer { target, task });
            }
        }
    }

    pub fn stop_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.task.abort();
        }
    }

    /// Ids with a live timer, sorted.
    pub fn active_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.timers.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn spawn_timer(&self, id: String, target: DateTime<Utc>) -> JoinHandle<()> {
        debug!(id = %id, "starting countdown timer");
        let ticks = self.ticks.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let display = countdown(Utc::now(), target);
                // No subscribers is fine; the next tick recomputes anyway.
                let _ = ticks.send(CountdownTick {
                    id: id.clone(),
                    display,
                });
            }
        })
    }
}

impl Drop for CountdownTimers {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn drain(rx: &mut broadcast::Receiver<CountdownTick>) -> Vec<CountdownTick> {
        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        ticks
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();
        let target = Utc::now() + ChronoDuration::days(2);

        timers.sync([("a", target)]);
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 4, "immediate tick plus one per second");
        assert!(ticks.iter().all(|t| t.id == "a"));
        assert!(
            ticks[0].display.starts_with("1:23:59:") || ticks[0].display.starts_with("2:00:00:")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_target_ticks_launched() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();

        timers.sync([("gone", Utc::now() - ChronoDuration::hours(1))]);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let ticks = drain(&mut rx);
        assert_eq!(ticks[0].display, "Launched");
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_item_stops_ticking() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();
        let target = Utc::now() + ChronoDuration::hours(5);

        timers.sync([("a", target), ("b", target)]);
        assert_eq!(timers.active_ids(), vec!["a", "b"]);
        tokio::time::sleep(Duration::from_millis(100)).await;

        timers.sync([("b", target)]);
        assert_eq!(timers.active_ids(), vec!["b"]);
        drain(&mut rx);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        let ticks = drain(&mut rx);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.id == "b"), "no ticks after unmount");
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_timer_is_kept_across_syncs() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();
        let target = Utc::now() + ChronoDuration::hours(5);

        timers.sync([("a", target)]);
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        timers.sync([("a", target)]);
        tokio::time::sleep(Duration::from_millis(1_000)).await;

        // 0s, 1s, 2s: a restarted timer would add an extra immediate tick
        assert_eq!(drain(&mut rx).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_changed_target_restarts_timer() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();
        let now = Utc::now();

        timers.sync([("a", now + ChronoDuration::hours(5))]);
        tokio::time::sleep(Duration::from_millis(10)).await;
        drain(&mut rx);

        timers.sync([("a", now - ChronoDuration::hours(1))]);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].display, "Launched");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_all_releases_every_timer() {
        let mut timers = CountdownTimers::new();
        let mut rx = timers.subscribe();
        let target = Utc::now() + ChronoDuration::hours(1);

        timers.sync([("a", target), ("b", target), ("c", target)]);
        assert_eq!(timers.active_ids(), vec!["a", "b", "c"]);

        timers.stop_all();
        assert!(timers.active_ids().is_empty());
        drain(&mut rx);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
