//! Time-remaining display for launches.
//!
//! [`countdown`] is a pure function of "now" and the launch time;
//! [`CountdownTimers`] re-evaluates it every second for each displayed launch.

mod timers;

pub use timers::{CountdownTick, CountdownTimers, TICK_PERIOD};

use chrono::{DateTime, Utc};

/// Shown once the launch time has been reached.
pub const LAUNCHED: &str = "Launched";

/// Formats the time left until `target` as `days:HH:MM:SS`.
pub fn countdown(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    if target <= now {
        return LAUNCHED.to_string();
    }

    let remaining = (target - now).num_seconds();
    let days = remaining / 86_400;
    let hours = (remaining / 3_600) % 24;
    let minutes = (remaining / 60) % 60;
    let seconds = remaining % 60;

    format!("{}:{:02}:{:02}:{:02}", days, hours, minutes, seconds)
}
