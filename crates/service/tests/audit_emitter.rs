use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;
use service::audit::{AuditEmitter, AuditError, AuditEvent, HttpAuditEmitter};

fn emitter(url: &str, strict: bool) -> HttpAuditEmitter {
    HttpAuditEmitter::with_options(url, Duration::from_secs(2), strict).unwrap()
}

#[tokio::test]
async fn test_posts_name_and_data_to_log_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/log")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "authentication", "data": "a@x.com logged in"})))
        .with_status(202)
        .expect(1)
        .create_async()
        .await;

    let result = emitter(&format!("{}/log", server.url()), false)
        .emit(AuditEvent::authentication("a@x.com"))
        .await;

    assert!(result.is_ok(), "{result:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_counts_as_delivered_by_default() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/log").with_status(500).with_body("boom").create_async().await;

    let result = emitter(&format!("{}/log", server.url()), false)
        .emit(AuditEvent::registration(1, "a@x.com"))
        .await;

    assert!(result.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_fails_when_strict() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/log").with_status(503).create_async().await;

    let result = emitter(&format!("{}/log", server.url()), true)
        .emit(AuditEvent::registration(1, "a@x.com"))
        .await;

    assert!(matches!(result, Err(AuditError::Status(503))), "{result:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_sink_is_transport_error() {
    // nothing listens on port 1
    let result = emitter("http://127.0.0.1:1/log", false)
        .emit(AuditEvent::authentication("a@x.com"))
        .await;
    assert!(matches!(result, Err(AuditError::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn test_hung_sink_is_bounded_by_timeout() {
    // accept the connection but never answer
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let emitter = HttpAuditEmitter::with_options(&format!("http://{addr}/log"), Duration::from_millis(200), false).unwrap();
    let start = std::time::Instant::now();
    let result = emitter.emit(AuditEvent::authentication("a@x.com")).await;

    assert!(matches!(result, Err(AuditError::Transport(_))), "{result:?}");
    assert!(start.elapsed() < Duration::from_secs(2));
}
