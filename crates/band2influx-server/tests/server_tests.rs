//! Health endpoint and server lifecycle tests

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::http::StatusCode;
use band2influx_server::api::{create_router, serve_with_shutdown};
use serde_json::json;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

mod common;
use common::{basic, test_app, test_state, SpySink, PASS, USER};

#[tokio::test]
async fn test_health_reports_reachable_sink() {
    let app = test_app(Arc::new(SpySink::default()));

    let (status, _, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "sink": "spy"}));
}

#[tokio::test]
async fn test_health_reports_unreachable_sink() {
    let app = test_app(Arc::new(SpySink::unreachable()));

    let (status, _, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_health_needs_no_credentials() {
    let app = test_app(Arc::new(SpySink::default()));
    let (status, _, _) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down_on_signal() {
    let sink = Arc::new(SpySink::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(
        listener,
        create_router(test_state(sink.clone())),
        async move {
            let _ = stop_rx.await;
        },
        Duration::from_secs(5),
    ));

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/datapoints", addr))
        .header("authorization", basic(USER, PASS))
        .header("content-type", "application/json")
        .body(r#"[{"timestamp":1000,"rawIntensity":5,"steps":10,"rawKind":1,"heartRate":70}]"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(sink.call_count(), 1);

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

const ONE_SAMPLE: &str = r#"[{"timestamp":1000,"rawIntensity":5,"steps":10,"rawKind":1,"heartRate":70}]"#;

fn spawn_post(addr: std::net::SocketAddr) -> tokio::task::JoinHandle<reqwest::Result<reqwest::Response>> {
    tokio::spawn(async move {
        reqwest::Client::new()
            .post(format!("http://{}/api/datapoints", addr))
            .header("authorization", basic(USER, PASS))
            .header("content-type", "application/json")
            .body(ONE_SAMPLE)
            .send()
            .await
    })
}

async fn wait_for_sink_call(sink: &SpySink) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while sink.call_count() == 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("request never reached the sink");
}

#[tokio::test]
async fn test_shutdown_finishes_in_flight_request_and_refuses_new_ones() {
    let sink = Arc::new(SpySink::slow(Duration::from_millis(800)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(
        listener,
        create_router(test_state(sink.clone())),
        async move {
            let _ = stop_rx.await;
        },
        Duration::from_secs(5),
    ));

    let in_flight = spawn_post(addr);
    wait_for_sink_call(&sink).await;

    stop_tx.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(
        TcpStream::connect(addr).await.is_err(),
        "listener still accepts after shutdown signal"
    );

    let response = in_flight.await.unwrap().unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let result = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_shutdown_is_bounded_by_grace_window() {
    let sink = Arc::new(SpySink::slow(Duration::from_secs(30)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(
        listener,
        create_router(test_state(sink.clone())),
        async move {
            let _ = stop_rx.await;
        },
        Duration::from_millis(300),
    ));

    let in_flight = spawn_post(addr);
    wait_for_sink_call(&sink).await;

    let started = Instant::now();
    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server ignored the grace window")
        .unwrap();

    assert!(result.is_ok());
    assert!(started.elapsed() < Duration::from_secs(3), "{:?}", started.elapsed());
    in_flight.abort();
}
