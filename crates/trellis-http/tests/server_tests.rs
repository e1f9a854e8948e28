mod common;

use std::io;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Request, StatusCode};
use common::GreetingModule;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;
use trellis_http::{HttpConfig, TrellisFactory};

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_router_feeds_dispatcher() {
    let router = TrellisFactory::create::<GreetingModule>().unwrap().into_router();

    let request = Request::builder()
        .method("POST")
        .uri("/greetings/echo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Jane"}"#))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(read_json(response).await, json!({"data": {"name": "Jane"}}));

    let request = Request::builder()
        .method("PUT")
        .uri("/greetings/echo")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(read_json(response).await, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let config = HttpConfig::default().with_max_request_size(8);
    let router = TrellisFactory::create_with_config::<GreetingModule>(config)
        .unwrap()
        .into_router();

    let request = Request::builder()
        .method("POST")
        .uri("/greetings/echo")
        .body(Body::from(r#"{"name":"a name longer than eight bytes"}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(read_json(response).await, json!({"error": "Payload Too Large"}));
}

#[tokio::test]
async fn test_interrupted_body_is_a_bad_request() {
    let router = TrellisFactory::create::<GreetingModule>().unwrap().into_router();

    let chunks = futures_util::stream::iter(vec![
        Ok(Bytes::from_static(b"{\"na")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
    ]);
    let request = Request::builder()
        .method("POST")
        .uri("/greetings/echo")
        .body(Body::from_stream(chunks))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Failed to read request body"})
    );
}

#[tokio::test]
async fn test_serves_over_tcp_until_shutdown() {
    let app = TrellisFactory::create::<GreetingModule>().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(app.serve(listener, async {
        let _ = shutdown_rx.await;
    }));

    let client = reqwest::Client::new();
    let base = format!("http://{}", address);

    let response = client.get(format!("{}/greetings/", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"data": "hello #1"}));

    let response = client.get(format!("{}/greetings/explode", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 500);

    let response = client.get(format!("{}/greetings/", base)).send().await.unwrap();
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"data": "hello #2"}));

    drop(client);
    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
