use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct ServerState {
    tx: Arc<Mutex<Option<oneshot::Sender<SummarizeRequest>>>>,
    status: StatusCode,
    body: &'static str,
}

async fn handle_summarize(
    State(state): State<ServerState>,
    Json(payload): Json<SummarizeRequest>,
) -> impl IntoResponse {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(payload);
    }
    (
        state.status,
        [("content-type", "application/json")],
        state.body,
    )
}

async fn spawn_summary_server(
    status: StatusCode,
    body: &'static str,
) -> anyhow::Result<(String, oneshot::Receiver<SummarizeRequest>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        tx: Arc::new(Mutex::new(Some(tx))),
        status,
        body,
    };
    let app = Router::new()
        .route(SUMMARIZE_ROUTE, post(handle_summarize))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

fn service_for(server_url: &str) -> HttpSummaryService {
    HttpSummaryService::new(&ServiceEndpoint::new(server_url)).expect("service")
}

fn request(text: &str) -> SummarizeRequest {
    SummarizeRequest {
        text: text.to_string(),
    }
}

#[test]
fn endpoint_joins_service_url_and_path() {
    let endpoint = ServiceEndpoint::new("http://127.0.0.1:8000");
    assert_eq!(
        endpoint.url().expect("url").as_str(),
        "http://127.0.0.1:8000/api/moe/summarize"
    );

    let custom = ServiceEndpoint {
        endpoint_path: "/v2/summarize".to_string(),
        ..ServiceEndpoint::new("https://summaries.example.com/")
    };
    assert_eq!(
        custom.url().expect("url").as_str(),
        "https://summaries.example.com/v2/summarize"
    );
}

#[test]
fn rejects_unparseable_service_url() {
    assert!(ServiceEndpoint::new("not a url").url().is_err());
}

#[tokio::test]
async fn posts_text_payload_and_reads_summary() {
    let (server_url, payload_rx) =
        spawn_summary_server(StatusCode::OK, r#"{"summary":"Greeting."}"#)
            .await
            .expect("spawn server");

    let response = service_for(&server_url)
        .summarize(&request("Hello world"))
        .await
        .expect("summarize");
    assert_eq!(response.usable_summary(), Some("Greeting."));

    let payload = payload_rx.await.expect("payload");
    assert_eq!(payload, request("Hello world"));
}

#[tokio::test]
async fn non_success_status_is_a_call_failure() {
    let (server_url, _payload_rx) =
        spawn_summary_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"summary":"ignored"}"#)
            .await
            .expect("spawn server");

    let err = service_for(&server_url)
        .summarize(&request("Test"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, SummaryCallError::Status { status: 500 }), "{err:?}");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn body_without_summary_is_not_a_failure() {
    let (server_url, _payload_rx) = spawn_summary_server(StatusCode::OK, "{}")
        .await
        .expect("spawn server");

    let response = service_for(&server_url)
        .summarize(&request("Test"))
        .await
        .expect("summarize");
    assert_eq!(response.summary, None);
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let (server_url, _payload_rx) = spawn_summary_server(StatusCode::OK, "<html>oops</html>")
        .await
        .expect("spawn server");

    let err = service_for(&server_url)
        .summarize(&request("Test"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, SummaryCallError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = service_for(&format!("http://{addr}"))
        .summarize(&request("Test"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, SummaryCallError::Transport(_)), "{err:?}");
    assert!(!err.is_timeout());
}
