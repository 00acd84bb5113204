use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{LaunchLink, LaunchRecord, LinkKind};

#[derive(Debug, Deserialize)]
struct WireLaunch {
    id: String,
    #[serde(default)]
    name: Option<String>,
    net: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    launch_service_provider: Option<WireProvider>,
    #[serde(default)]
    mission: Option<WireMission>,
    #[serde(default)]
    vid_urls: Option<Vec<WireUrl>>,
    #[serde(default)]
    info_urls: Option<Vec<WireInfoUrl>>,
}

#[derive(Debug, Deserialize)]
struct WireProvider {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMission {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireInfoUrl {
    Plain(String),
    Object { url: String },
}

impl WireInfoUrl {
    fn into_url(self) -> String {
        match self {
            WireInfoUrl::Plain(url) | WireInfoUrl::Object { url } => url,
        }
    }
}

/// Turns upstream page bodies into launch records.
///
/// Never fails: a body without a readable `results` array is an empty page,
/// and unreadable entries are dropped from an otherwise good page.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Vec<LaunchRecord> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "launch page is not valid JSON; treating as empty");
                return Vec::new();
            }
        };

        let results = match value.get("results") {
            Some(Value::Array(results)) => results,
            Some(_) => {
                warn!("launch page `results` is not an array; treating as empty");
                return Vec::new();
            }
            None => {
                warn!("launch page has no `results`; treating as empty");
                return Vec::new();
            }
        };

        let launches: Vec<LaunchRecord> = results
            .iter()
            .filter_map(|entry| match WireLaunch::deserialize(entry) {
                Ok(wire) => to_record(wire),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable launch entry");
                    None
                }
            })
            .collect();

        debug!("normalized {} of {} launch entries", launches.len(), results.len());
        launches
    }
}

fn to_record(wire: WireLaunch) -> Option<LaunchRecord> {
    let scheduled_time = match DateTime::parse_from_rfc3339(&wire.net) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            warn!(
                id = %wire.id,
                net = %wire.net,
                error = %e,
                "skipping launch with unreadable time"
            );
            return None;
        }
    };

    let mut links: Vec<LaunchLink> = wire
        .vid_urls
        .unwrap_or_default()
        .into_iter()
        .map(|v| LaunchLink::new(LinkKind::Video, v.url))
        .collect();
    links.extend(
        wire.info_urls
            .unwrap_or_default()
            .into_iter()
            .map(|i| LaunchLink::new(LinkKind::Info, i.into_url())),
    );

    Some(LaunchRecord {
        id: wire.id,
        name: wire.name.unwrap_or_default(),
        scheduled_time,
        agency_name: wire
            .launch_service_provider
            .and_then(|p| p.name)
            .unwrap_or_default(),
        image_url: wire.image,
        mission_description: wire.mission.and_then(|m| m.description),
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_SAMPLE: &str = r#"{
  "count": 2,
  "results": [
    {
      "id": "a1",
      "name": "Falcon 9 | Starlink",
      "net": "2026-11-01T12:30:00Z",
      "image": "https://img.example/f9.png",
      "launch_service_provider": { "name": "SpaceX" },
      "mission": { "description": "Batch of Starlink satellites" },
      "vid_urls": [{ "url": "https://video.example/live" }],
      "info_urls": ["https://info.example/a1"]
    },
    {
      "id": "b2",
      "name": "Artemis II",
      "net": "2026-12-05T08:00:00+02:00",
      "launch_service_provider": { "name": "NASA" },
      "mission": null,
      "vid_urls": null,
      "info_urls": [{ "url": "https://info.example/b2" }]
    }
  ]
}"#;

    #[test]
    fn test_parse_page() {
        let launches = Normalizer::new().normalize(PAGE_SAMPLE.as_bytes());

        assert_eq!(launches.len(), 2);
        assert_eq!(launches[0].id, "a1");
        assert_eq!(launches[0].agency_name, "SpaceX");
        assert_eq!(launches[0].image_url.as_deref(), Some("https://img.example/f9.png"));
        assert_eq!(launches[0].links.len(), 2);
        assert_eq!(launches[0].links[0].kind, LinkKind::Video);
        assert_eq!(launches[0].links[1].kind, LinkKind::Info);

        assert_eq!(launches[1].mission_description, None);
        assert_eq!(launches[1].first_link(LinkKind::Info), Some("https://info.example/b2"));
        assert_eq!(launches[1].scheduled_time.to_rfc3339(), "2026-12-05T06:00:00+00:00");
    }

    #[test]
    fn test_missing_results_is_empty_page() {
        assert!(Normalizer::new().normalize(br#"{"count": 0}"#).is_empty());
    }

    #[test]
    fn test_non_array_results_is_empty_page() {
        assert!(Normalizer::new().normalize(br#"{"results": {"id": "x"}}"#).is_empty());
    }

    #[test]
    fn test_invalid_json_is_empty_page() {
        assert!(Normalizer::new().normalize(b"<html>gateway timeout</html>").is_empty());
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let body = r#"{"results": [
            {"name": "no id", "net": "2026-11-01T12:30:00Z"},
            {"id": "bad-net", "net": "soon"},
            {"id": "ok", "name": "Ok", "net": "2026-11-01T12:30:00Z"}
        ]}"#;
        let launches = Normalizer::new().normalize(body.as_bytes());
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].id, "ok");
        assert_eq!(launches[0].agency_name, "");
        assert!(launches[0].links.is_empty());
    }
}
