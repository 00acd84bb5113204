use std::sync::Arc;

use launch_atlas::app::AppContext;
use launch_atlas::config::Config;
use launch_atlas::feed::{FetchStatus, FilterSpec};
use launch_atlas::store::SqliteStore;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/launch/upcoming/", server.uri());
    config.api.retry_delay_ms = 10;
    config
}

fn page(ids: &[(&str, &str)]) -> serde_json::Value {
    let results: Vec<_> = ids
        .iter()
        .map(|(id, agency)| {
            json!({
                "id": id,
                "name": format!("Mission {}", id),
                "net": "2099-06-01T10:00:00Z",
                "launch_service_provider": { "name": agency },
                "info_urls": [format!("https://info.example/{}", id)]
            })
        })
        .collect();
    json!({ "count": 100, "results": results })
}

async fn mount_page(server: &MockServer, offset: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/launch/upcoming/"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", offset))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn feed_pages_filters_and_persists_likes() {
    let server = MockServer::start().await;
    mount_page(&server, "0", page(&[("a", "NASA"), ("b", "SpaceX")])).await;
    mount_page(&server, "10", page(&[("c", "NASA")])).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("atlas.db");

    {
        let store = Arc::new(SqliteStore::new(&db_path).unwrap());
        let ctx = AppContext::with_store(config_for(&server), store).unwrap();
        let feed = ctx.feed_controller();

        feed.initialize().await;
        feed.load_more().await;
        feed.load_more().await;

        let snapshot = feed.snapshot();
        let ids: Vec<_> = snapshot.state.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "a", "b", "c"]);
        assert_eq!(snapshot.agencies, vec!["NASA", "SpaceX"]);
        assert_eq!(snapshot.state.next_offset, 20);

        assert!(feed.toggle_like("c").await);
        feed.set_filter(FilterSpec::new(Some("NASA".into()), true));
        let visible: Vec<_> = feed
            .snapshot()
            .visible
            .iter()
            .map(|v| v.action.url.clone())
            .collect();
        assert_eq!(visible, vec!["https://info.example/c"]);
        feed.dispose();
    }

    // A new session sees the persisted like
    let store = Arc::new(SqliteStore::new(&db_path).unwrap());
    let ctx = AppContext::with_store(config_for(&server), store).unwrap();
    let feed = ctx.feed_controller();
    feed.load_likes().await;
    assert!(feed.snapshot().liked.contains("c"));
    assert_eq!(feed.snapshot().liked.len(), 1);
}

#[tokio::test]
async fn server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let ctx = AppContext::ephemeral(config_for(&server)).unwrap();
    let feed = ctx.feed_controller();
    feed.initialize().await;

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.state.status, FetchStatus::Failed);
    assert!(snapshot.state.items.is_empty());
    assert!(snapshot.notice.is_some());
}

#[tokio::test]
async fn payload_without_results_is_an_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, "0", json!({ "detail": "nothing here" })).await;

    let ctx = AppContext::ephemeral(config_for(&server)).unwrap();
    let feed = ctx.feed_controller();
    feed.initialize().await;

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.state.status, FetchStatus::Idle);
    assert!(snapshot.state.items.is_empty());
    assert!(snapshot.notice.is_none());
}
