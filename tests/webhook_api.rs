//! End-to-end tests for the HTTP surface.

use chrono::NaiveDateTime;
use loggifly_helper::writer::LogFormat;
use serde_json::Value;

mod common;

use common::{read_lines, start_helper, TIMESTAMP_WIDTH};

fn assert_timestamp(text: &str) {
    assert!(
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.6f").is_ok(),
        "not an ISO timestamp: {}",
        text
    );
}

#[tokio::test]
async fn test_detailed_line() {
    let helper = start_helper(|c| c.log.format = LogFormat::Detailed).await;

    let res = helper
        .post_json(r#"{"container":"nginx","keyword":"error","message":"404 Not Found"}"#)
        .await;
    assert_eq!(res.status(), 200);
    let ack: Value = res.json().await.unwrap();
    assert_eq!(ack["status"], "success");

    let lines = read_lines(&helper.log_path);
    assert_eq!(lines.len(), 1);
    let (timestamp, rest) = lines[0].split_at(TIMESTAMP_WIDTH);
    assert_timestamp(timestamp);
    assert_eq!(rest, " - INFO - Container: nginx | Keyword: error | Message: 404 Not Found");

    helper.stop().await;
}

#[tokio::test]
async fn test_simple_line_with_empty_payload() {
    let helper = start_helper(|c| c.log.format = LogFormat::Simple).await;

    assert_eq!(helper.post_json("{}").await.status(), 200);

    let contents = std::fs::read_to_string(&helper.log_path).unwrap();
    let (timestamp, rest) = contents.split_at(TIMESTAMP_WIDTH);
    assert_timestamp(timestamp);
    assert_eq!(rest, " - unknown | unknown | \n");

    helper.stop().await;
}

#[tokio::test]
async fn test_json_line_preserves_raw_data() {
    let helper = start_helper(|c| c.log.format = LogFormat::Json).await;
    let payload = r#"{"container":"db","keyword":"oom","message":"killed","extra":{"pid":4242,"tags":["a","b"]},"ratio":0.5}"#;

    assert_eq!(helper.post_json(payload).await.status(), 200);

    let lines = read_lines(&helper.log_path);
    assert_eq!(lines.len(), 1);
    let line: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(line["level"], "INFO");
    assert_timestamp(line["timestamp"].as_str().unwrap());
    assert_eq!(line["message"]["container"], "db");
    assert_eq!(line["message"]["keyword"], "oom");
    assert_eq!(line["message"]["message"], "killed");
    assert_eq!(serde_json::to_string(&line["message"]["raw_data"]).unwrap(), payload);

    helper.stop().await;
}

#[tokio::test]
async fn test_malformed_payloads_are_rejected() {
    let helper = start_helper(|_| {}).await;

    for body in ["not json", "[1,2]", "\"string\"", "", "{\"open\":"] {
        let res = helper.post_json(body).await;
        assert_eq!(res.status(), 400, "body {:?}", body);
        let err: Value = res.json().await.unwrap();
        assert_eq!(err["status"], "error");
    }

    assert!(read_lines(&helper.log_path).is_empty());
    let (_, stats) = helper.get_json("/stats").await;
    assert_eq!(stats["notifications_received"], 0);
    assert_eq!(stats["main_log_size"], 0);

    helper.stop().await;
}

#[tokio::test]
async fn test_config_is_stable() {
    let helper = start_helper(|c| {
        c.log.format = LogFormat::Json;
        c.log.max_size = "1KB".to_string();
        c.log.backup_count = 7;
    })
    .await;

    let (status, first) = helper.get_json("/config").await;
    assert_eq!(status, 200);
    assert_eq!(first["port"], helper.addr.port());
    assert_eq!(first["host"], "127.0.0.1");
    assert_eq!(first["log_format"], "json");
    assert_eq!(first["log_rotation"], true);
    assert_eq!(first["max_log_size"], "1KB");
    assert_eq!(first["max_log_size_bytes"], 1024);
    assert_eq!(first["backup_count"], 7);
    assert_eq!(first["log_file"], helper.log_path.to_str().unwrap());

    helper.post_json(r#"{"container":"x"}"#).await;

    for _ in 0..3 {
        let (_, again) = helper.get_json("/config").await;
        assert_eq!(again, first);
    }

    helper.stop().await;
}

#[tokio::test]
async fn test_health_does_not_need_log_file() {
    let helper = start_helper(|_| {}).await;
    std::fs::remove_dir_all(helper.log_path.parent().unwrap()).unwrap();

    let (status, health) = helper.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));

    helper.stop().await;
}

#[tokio::test]
async fn test_write_failure_is_a_server_error() {
    let helper = start_helper(|_| {}).await;
    std::fs::remove_dir_all(helper.log_path.parent().unwrap()).unwrap();

    let res = helper.post_json(r#"{"container":"lost?"}"#).await;
    assert_eq!(res.status(), 500);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["status"], "error");
    assert!(err["message"].as_str().unwrap().contains("notifications.log"));

    let (status, stats) = helper.get_json("/stats").await;
    assert_eq!(status, 200);
    assert_eq!(stats["notifications_received"], 1);
    assert_eq!(stats["notifications_logged"], 0);
    assert_eq!(stats["write_errors"], 1);

    helper.stop().await;
}

#[tokio::test]
async fn test_stats_track_notifications() {
    let helper = start_helper(|c| c.log.format = LogFormat::Simple).await;

    for i in 0..5 {
        let res = helper.post_json(&format!(r#"{{"container":"c{}"}}"#, i)).await;
        assert_eq!(res.status(), 200);
    }

    let (status, stats) = helper.get_json("/stats").await;
    assert_eq!(status, 200);
    let size = std::fs::metadata(&helper.log_path).unwrap().len();
    assert_eq!(stats["main_log_size"], size);
    assert_eq!(stats["notifications_received"], 5);
    assert_eq!(stats["notifications_logged"], 5);
    assert_eq!(stats["rotated_files"], 0);
    assert_eq!(stats["total_files"], 1);

    helper.stop().await;
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let helper = start_helper(|_| {}).await;

    let res = helper
        .client
        .get(helper.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = helper.client.get(helper.url("/health")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    helper.stop().await;
}
