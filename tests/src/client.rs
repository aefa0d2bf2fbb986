use scanbatch_common::config::{ScanSpeed, ScannerConfig};
use scanbatch_core::{Error, ScannerApi, ScannerClient};
use serde_json::json;

use crate::support::{closed_port_url, MockScanner, TEST_API_KEY};

const TARGETS: &str = "/api/v1/targets";
const SCANS: &str = "/api/v1/scans";

fn client_for(mock: &MockScanner) -> ScannerClient {
    ScannerClient::new(mock.config()).expect("building client")
}

#[tokio::test]
async fn construction_sends_nothing() {
    let mock = MockScanner::start().await;
    let _client = client_for(&mock);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn add_target_returns_assigned_id() {
    let mock = MockScanner::start().await;
    mock.on("POST", TARGETS, 201, r#"{"target_id":"abc","address":"http://a.example"}"#);

    let id = client_for(&mock).add_target("http://a.example").await.unwrap();
    assert_eq!(id, "abc");

    let sent = mock.requests_to("POST", TARGETS);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].json(),
        json!({"address": "http://a.example", "description": "Added by scanbatch", "criticality": 10})
    );
}

#[tokio::test]
async fn every_request_carries_auth_and_content_type() {
    let mock = MockScanner::start().await;
    mock.on("POST", TARGETS, 200, r#"{"target_id":"abc"}"#)
        .on("GET", TARGETS, 200, r#"{"targets":[]}"#);

    let client = client_for(&mock);
    client.add_target("http://a.example").await.unwrap();
    client.get_targets().await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.header("X-Auth"), Some(TEST_API_KEY));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }
}

#[tokio::test]
async fn add_target_surfaces_status_and_body() {
    let mock = MockScanner::start().await;
    mock.on("POST", TARGETS, 500, r#"{"message":"internal"}"#);

    let err = client_for(&mock).add_target("http://a.example").await.unwrap_err();
    assert!(err.to_string().contains("500"), "message was: {err}");
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(r#"{"message":"internal"}"#));
}

#[tokio::test]
async fn add_target_without_id_is_an_error() {
    let mock = MockScanner::start().await;
    mock.on("POST", TARGETS, 201, r#"{"address":"http://a.example"}"#);

    let err = client_for(&mock).add_target("http://a.example").await.unwrap_err();
    assert!(matches!(err, Error::MissingField("target_id")), "unexpected: {err}");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mock = MockScanner::start().await;
    mock.on("GET", TARGETS, 200, "<html>please log in</html>");

    let err = client_for(&mock).get_targets().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "unexpected: {err}");
    assert_eq!(err.body(), Some("<html>please log in</html>"));
}

#[tokio::test]
async fn unreachable_scanner_is_a_transport_error() {
    let config = ScannerConfig {
        api_url: closed_port_url().await,
        api_key: TEST_API_KEY.into(),
        ..ScannerConfig::default()
    };

    let err = ScannerClient::new(config).unwrap().get_targets().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "unexpected: {err}");
}

#[tokio::test]
async fn requests_go_through_the_client_proxy() {
    let proxy = MockScanner::start().await;
    proxy.on("GET", TARGETS, 200, r#"{"targets":[]}"#);

    let config = ScannerConfig {
        api_url: "http://scanner.invalid".into(),
        api_key: TEST_API_KEY.into(),
        client_proxy: Some(proxy.url()),
        ..ScannerConfig::default()
    };
    let targets = ScannerClient::new(config).unwrap().get_targets().await.unwrap();
    assert!(targets.is_empty());

    let seen = proxy.requests_to("GET", TARGETS);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].header("X-Auth"), Some(TEST_API_KEY));
    assert_eq!(seen[0].header("Host"), Some("scanner.invalid"));
}

#[tokio::test]
async fn empty_target_list_is_not_an_error() {
    let mock = MockScanner::start().await;
    mock.on("GET", TARGETS, 200, r#"{"targets":[]}"#);

    assert!(client_for(&mock).get_targets().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_targets_is_repeatable() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        TARGETS,
        200,
        r#"{"targets":[{"target_id":"t1","address":"http://a","criticality":10},
                       {"target_id":"t2","address":"http://b","criticality":20}]}"#,
    );

    let client = client_for(&mock);
    let first = client.get_targets().await.unwrap();
    let second = client.get_targets().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(first[1].address, "http://b");
    assert_eq!(mock.requests_to("GET", TARGETS).len(), 2);
}

#[tokio::test]
async fn start_scan_sends_schedule_and_speed() {
    let mock = MockScanner::start().await;
    mock.on("POST", SCANS, 201, "{}");

    let mut config = mock.config();
    config.scan_speed = ScanSpeed::Slow;
    let client = ScannerClient::new(config).unwrap();

    // Not in the built-in table; the client must not care.
    client.start_scan("t1", "my-custom-profile").await.unwrap();

    let sent = mock.requests_to("POST", SCANS);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].json(),
        json!({
            "target_id": "t1",
            "profile_id": "my-custom-profile",
            "schedule": {"disable": false, "start_date": null, "time_sensitive": false},
            "scan_speed": "slow",
            "user_authorized_to_scan": "yes"
        })
    );
}

#[tokio::test]
async fn start_scan_includes_enabled_scan_proxy() {
    let mock = MockScanner::start().await;
    mock.on("POST", SCANS, 201, "{}");

    let mut config = mock.config();
    config.set_scan_proxy("10.0.0.9:8080").unwrap();
    ScannerClient::new(config).unwrap().start_scan("t1", "p").await.unwrap();

    let payload = mock.requests_to("POST", SCANS)[0].json();
    assert_eq!(payload["proxy"], json!({"address": "10.0.0.9", "port": 8080}));
}

#[tokio::test]
async fn start_scan_failure_keeps_body() {
    let mock = MockScanner::start().await;
    mock.on("POST", SCANS, 400, r#"{"message":"unknown profile"}"#);

    let err = client_for(&mock).start_scan("t1", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("unknown profile"));
}

#[tokio::test]
async fn delete_all_targets_deletes_each_once() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        TARGETS,
        200,
        r#"{"targets":[{"target_id":"t1"},{"target_id":"t2"},{"target_id":"t3"}]}"#,
    )
    .on_prefix("DELETE", "/api/v1/targets/", 204, "");

    let deleted = client_for(&mock).delete_all_targets().await.unwrap();
    assert_eq!(deleted, 3);

    let paths: Vec<String> = mock
        .requests_to("DELETE", TARGETS)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        vec!["/api/v1/targets/t1", "/api/v1/targets/t2", "/api/v1/targets/t3"]
    );
}

#[tokio::test]
async fn delete_all_targets_stops_at_first_failure() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        TARGETS,
        200,
        r#"{"targets":[{"target_id":"t1"},{"target_id":"t2"},{"target_id":"t3"}]}"#,
    )
    .on_prefix("DELETE", "/api/v1/targets/", 200, "")
    .on("DELETE", "/api/v1/targets/t2", 403, r#"{"message":"locked"}"#);

    let err = client_for(&mock).delete_all_targets().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(mock.requests_to("DELETE", TARGETS).len(), 2);
}

#[tokio::test]
async fn delete_all_targets_with_none_sends_no_deletes() {
    let mock = MockScanner::start().await;
    mock.on("GET", TARGETS, 200, r#"{"targets":[]}"#);

    assert_eq!(client_for(&mock).delete_all_targets().await.unwrap(), 0);
    assert!(mock.requests_to("DELETE", TARGETS).is_empty());
}

#[tokio::test]
async fn delete_all_scans_mirrors_targets() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        SCANS,
        200,
        r#"{"scans":[{"scan_id":"s1","target_id":"t1"},{"scan_id":"s2","target_id":"t2"}]}"#,
    )
    .on_prefix("DELETE", "/api/v1/scans/", 204, "");

    assert_eq!(client_for(&mock).delete_all_scans().await.unwrap(), 2);
    let paths: Vec<String> = mock
        .requests_to("DELETE", SCANS)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/api/v1/scans/s1", "/api/v1/scans/s2"]);
}

#[tokio::test]
async fn delete_all_scans_stops_at_first_failure() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        SCANS,
        200,
        r#"{"scans":[{"scan_id":"s1"},{"scan_id":"s2"},{"scan_id":"s3"}]}"#,
    )
    .on_prefix("DELETE", "/api/v1/scans/", 204, "")
    .on("DELETE", "/api/v1/scans/s2", 403, r#"{"message":"locked"}"#);

    let err = client_for(&mock).delete_all_scans().await.unwrap_err();
    assert_eq!(err.status(), Some(403));

    let paths: Vec<String> = mock
        .requests_to("DELETE", SCANS)
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/api/v1/scans/s1", "/api/v1/scans/s2"]);
}

#[tokio::test]
async fn listing_scans_failure_deletes_nothing() {
    let mock = MockScanner::start().await;
    mock.on("GET", SCANS, 401, r#"{"message":"bad key"}"#);

    let err = client_for(&mock).delete_all_scans().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(mock.requests_to("DELETE", SCANS).is_empty());
}

#[tokio::test]
async fn lists_scanning_profiles() {
    let mock = MockScanner::start().await;
    mock.on(
        "GET",
        "/api/v1/scanning_profiles",
        200,
        r#"{"scanning_profiles":[
            {"profile_id":"11111111-1111-1111-1111-111111111111","name":"Full Scan","custom":false,"sort_order":1},
            {"profile_id":"c0ffee","name":"Login only","custom":true}
        ]}"#,
    );

    let profiles = client_for(&mock).get_scanning_profiles().await.unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Full Scan");
    assert!(profiles[1].custom);
}
