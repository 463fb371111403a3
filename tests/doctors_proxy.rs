//! `/api/doctors` passthrough tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_body_is_forwarded_unchanged() {
    let upstream = common::start_upstream(200, common::DOCTORS_JSON).await;
    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/doctors", addr))
        .send()
        .await
        .expect("directory unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), common::DOCTORS_JSON);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_error_status_maps_to_500() {
    let upstream = common::start_upstream(503, "maintenance").await;
    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/doctors", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to fetch doctor data" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_json_body_maps_to_500() {
    let upstream = common::start_upstream(200, "<html>not json</html>").await;
    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/doctors", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch doctor data");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_500() {
    // Reserve a port, then free it so nothing is listening there.
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", dead_addr)).await;

    let res = common::client()
        .get(format!("http://{}/api/doctors", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);

    shutdown.trigger();
}

#[tokio::test]
async fn test_no_caching_between_requests() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let upstream = common::start_programmable_upstream(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (200, "[]".to_string())
        }
    })
    .await;
    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", upstream)).await;

    let client = common::client();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/api/doctors", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.text().await.unwrap(), "[]");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn test_caller_request_id_is_echoed() {
    let upstream = common::start_upstream(200, "[]").await;
    let (addr, shutdown) = common::start_directory(format!("http://{}/data.json", upstream)).await;

    let res = common::client()
        .get(format!("http://{}/api/doctors", addr))
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-me-42");

    shutdown.trigger();
}
