use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Video,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchLink {
    pub kind: LinkKind,
    pub url: String,
}

impl LaunchLink {
    pub fn new(kind: LinkKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

/// One upcoming launch as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub id: String,
    pub name: String,
    pub scheduled_time: DateTime<Utc>,
    pub agency_name: String,
    pub image_url: Option<String>,
    pub mission_description: Option<String>,
    /// Candidate "more info" links in upstream order, videos first
    pub links: Vec<LaunchLink>,
}

impl LaunchRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        agency_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scheduled_time,
            agency_name: agency_name.into(),
            image_url: None,
            mission_description: None,
            links: Vec::new(),
        }
    }

    pub fn first_link(&self, kind: LinkKind) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.kind == kind)
            .map(|link| link.url.as_str())
    }

    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image_url.as_deref().unwrap_or(placeholder)
    }

    pub fn mission_summary(&self) -> &str {
        self.mission_description
            .as_deref()
            .unwrap_or("No mission details available.")
    }
}
