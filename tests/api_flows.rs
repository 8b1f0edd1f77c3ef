//! End-to-end flows through a running proxy against a mock mirror.

use httpmock::prelude::*;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_popular_returns_at_most_limit_with_identity_fields() {
    let mirror = MockServer::start_async().await;
    let stations: Vec<Value> = (0..10).map(common::station).collect();
    let mock = mirror
        .mock_async(|when, then| {
            when.method(GET)
                .path("/json/stations/search")
                .query_param("limit", "10")
                .query_param("order", "clickcount")
                .query_param("reverse", "true")
                .query_param("hidebroken", "true");
            then.status(200).json_body(Value::Array(stations));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    let res = proxy
        .client
        .get(proxy.url("/radio/popular?limit=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Vec<Value> = res.json().await.unwrap();
    assert!(body.len() <= 10);
    for station in &body {
        assert!(!station["stationuuid"].as_str().unwrap().is_empty());
        assert!(!station["name"].as_str().unwrap().is_empty());
        assert!(station.get("changeuuid").is_none(), "unknown fields are dropped");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_respects_limit_and_forwards_filters() {
    let mirror = MockServer::start_async().await;
    // A misbehaving mirror that ignores the limit.
    let stations: Vec<Value> = (0..8).map(common::station).collect();
    let mock = mirror
        .mock_async(|when, then| {
            when.method(GET)
                .path("/json/stations/search")
                .query_param("name", "BBC")
                .query_param("country", "United Kingdom")
                .query_param("limit", "5")
                .query_param("offset", "20");
            then.status(200).json_body(Value::Array(stations));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    let res = proxy
        .client
        .get(proxy.url("/radio/search"))
        .query(&[("name", "BBC"), ("country", "United Kingdom"), ("limit", "5"), ("offset", "20")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body.len(), 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_out_of_range_paging_is_rejected_before_upstream() {
    let mirror = MockServer::start_async().await;
    let mock = mirror
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!([]));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    for path in ["/radio/search?limit=0", "/radio/search?limit=101", "/radio/search?offset=-5"] {
        let res = proxy.client.get(proxy.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 422, "{path}");
    }
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_countries_never_include_empty_entries() {
    let mirror = MockServer::start_async().await;
    mirror
        .mock_async(|when, then| {
            when.method(GET).path("/json/countries");
            then.status(200).json_body(json!([
                {"name": "Germany", "iso_3166_1": "DE", "stationcount": 3050},
                {"name": "Bouvet Island", "iso_3166_1": "BV", "stationcount": 0},
                {"name": "Austria", "iso_3166_1": "AT", "stationcount": 412}
            ]));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    let body: Vec<Value> = proxy
        .client
        .get(proxy.url("/radio/countries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|c| c["stationcount"].as_i64().unwrap() > 0));
}

#[tokio::test]
async fn test_genres_reshaped() {
    let mirror = MockServer::start_async().await;
    mirror
        .mock_async(|when, then| {
            when.method(GET)
                .path("/json/tags")
                .query_param("limit", "2")
                .query_param("order", "stationcount");
            then.status(200).json_body(json!([
                {"name": "pop", "stationcount": 9000},
                {"name": "rock", "stationcount": 7000}
            ]));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    let body: Value = proxy
        .client
        .get(proxy.url("/radio/genres?limit=2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!([
            {"name": "pop", "stationcount": 9000},
            {"name": "rock", "stationcount": 7000}
        ])
    );
}

#[tokio::test]
async fn test_station_details_and_not_found() {
    let mirror = MockServer::start_async().await;
    let known = common::station(1);
    let uuid = known["stationuuid"].as_str().unwrap().to_string();
    let known_path = format!("/json/stations/byuuid/{}", uuid);
    mirror
        .mock_async(|when, then| {
            when.method(GET).path(known_path);
            then.status(200).json_body(json!([known]));
        })
        .await;
    mirror
        .mock_async(|when, then| {
            when.method(GET).path("/json/stations/byuuid/does-not-exist");
            then.status(200).json_body(json!([]));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;

    let res = proxy
        .client
        .get(proxy.url(&format!("/radio/station/{}", uuid)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let station: Value = res.json().await.unwrap();
    assert_eq!(station["stationuuid"], uuid.as_str());
    assert_eq!(station["bitrate"], 128);

    let res = proxy
        .client
        .get(proxy.url("/radio/station/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Station not found"}));
}

#[tokio::test]
async fn test_click_registration_success() {
    let mirror = MockServer::start_async().await;
    let mock = mirror
        .mock_async(|when, then| {
            when.method(GET).path("/json/url/abc");
            then.status(200).json_body(json!({"ok": true, "message": "retrieved station url"}));
        })
        .await;

    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;
    let res = proxy.client.post(proxy.url("/radio/click/abc")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"registered": true, "message": "Click registered successfully"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_status_round_trip() {
    let mirror = MockServer::start_async().await;
    let proxy = common::start_proxy(common::config_with_mirrors(vec![mirror.base_url()])).await;

    let res = proxy
        .client
        .post(proxy.url("/status"))
        .json(&json!({"client_name": "probe"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["client_name"], "probe");
    assert!(created["id"].is_string());
    assert!(created["timestamp"].is_string());

    let listed: Vec<Value> = proxy
        .client
        .get(proxy.url("/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().any(|c| c["client_name"] == "probe" && c["id"] == created["id"]));
}

#[tokio::test]
async fn test_status_persists_in_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status_checks.jsonl");

    let mut config = common::config_with_mirrors(vec!["http://127.0.0.1:1".into()]);
    config.storage.backend = radio_proxy::config::StorageBackend::File;
    config.storage.path = Some(path.to_string_lossy().into_owned());

    {
        let proxy = common::start_proxy(config.clone()).await;
        let res = proxy
            .client
            .post(proxy.url("/status"))
            .json(&json!({"client_name": "probe"}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    let proxy = common::start_proxy(config).await;
    let listed: Vec<Value> = proxy
        .client
        .get(proxy.url("/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["client_name"], "probe");
}

#[tokio::test]
async fn test_liveness() {
    let config = common::config_with_mirrors(vec!["http://127.0.0.1:1".into()]);
    let proxy = common::start_proxy(config).await;
    let body: Value = proxy
        .client
        .get(proxy.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"message": "Global Radio API"}));
}
