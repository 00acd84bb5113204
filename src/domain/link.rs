use std::fmt;

use tracing::warn;
use url::Url;

use crate::domain::{LaunchRecord, LinkKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    WatchLive,
    ReadMore,
    MissionInfo,
}

impl ActionLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionLabel::WatchLive => "Watch Live",
            ActionLabel::ReadMore => "Read More",
            ActionLabel::MissionInfo => "Mission Info",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single outbound link presented for a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    pub url: String,
    pub label: ActionLabel,
}

impl ActionLink {
    /// First video link, else first info link, else a search for the mission.
    pub fn resolve(launch: &LaunchRecord, fallback_search_url: &str) -> Self {
        if let Some(url) = launch.first_link(LinkKind::Video) {
            return Self {
                url: url.to_string(),
                label: ActionLabel::WatchLive,
            };
        }

        if let Some(url) = launch.first_link(LinkKind::Info) {
            return Self {
                url: url.to_string(),
                label: ActionLabel::ReadMore,
            };
        }

        Self {
            url: search_url(fallback_search_url, launch),
            label: ActionLabel::MissionInfo,
        }
    }
}

fn search_url(base: &str, launch: &LaunchRecord) -> String {
    let mission = non_empty(&launch.name).unwrap_or("Unknown Mission");
    let agency = non_empty(&launch.agency_name).unwrap_or("Unknown Agency");
    let query = format!("{} {} mission details", mission, agency);

    match Url::parse_with_params(base, &[("q", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!(base, error = %e, "invalid fallback search url");
            base.to_string()
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
