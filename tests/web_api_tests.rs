use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use thinkchat::connector::web::{router, spawn_session_sweeper, SessionView, TurnResponse};
use thinkchat::{ChatClient, Container, ContainerConfig, MockChatClient, DEFAULT_GREETING};

/// Start the UI on an ephemeral port and return its base URL.
async fn spawn_app(client: Arc<dyn ChatClient>) -> String {
    let container = Arc::new(Container::with_chat_client(ContainerConfig::default(), client));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router(container)).await.expect("serve");
    });
    format!("http://{}", addr)
}

async fn create_session(http: &reqwest::Client, base: &str) -> SessionView {
    let res = http
        .post(format!("{base}/api/sessions"))
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.expect("session json")
}

#[tokio::test]
async fn index_page_and_health() {
    let base = spawn_app(Arc::new(MockChatClient::new())).await;
    let http = reqwest::Client::new();

    let page = http.get(format!("{base}/")).send().await.expect("index");
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.text().await.expect("body").contains("Reset Chat"));

    let health = http.get(format!("{base}/health")).send().await.expect("health");
    assert_eq!(health.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn new_session_starts_with_greeting() {
    let base = spawn_app(Arc::new(MockChatClient::new())).await;
    let http = reqwest::Client::new();

    let session = create_session(&http, &base).await;

    assert_eq!(session.messages.len(), 1);
    assert_eq!(session.messages[0].content, DEFAULT_GREETING);
}

#[tokio::test]
async fn send_reset_and_end_session() {
    let base = spawn_app(Arc::new(MockChatClient::new())).await;
    let http = reqwest::Client::new();
    let session = create_session(&http, &base).await;
    let id = &session.id;

    let turn: TurnResponse = http
        .post(format!("{base}/api/sessions/{id}/messages"))
        .json(&json!({ "content": "hi there" }))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("turn json");

    assert_eq!(turn.reply.answer, "You said: hi there");
    assert!(turn.reply.reasoning.is_some());
    assert!(turn.error.is_none());
    assert_eq!(turn.session.messages.len(), 3);
    assert!(turn.session.messages[2].content.starts_with("<think>"));
    assert_eq!(turn.session.messages[2].answer, "You said: hi there");

    let reset: SessionView = http
        .post(format!("{base}/api/sessions/{id}/reset"))
        .send()
        .await
        .expect("reset")
        .json()
        .await
        .expect("reset json");
    assert_eq!(reset.messages.len(), 1);

    let ended = http
        .delete(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .expect("delete");
    assert_eq!(ended.status(), StatusCode::NO_CONTENT);

    let gone = http
        .get(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .expect("get");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completion_failure_is_reported_in_turn() {
    let base = spawn_app(Arc::new(MockChatClient::failing("invalid api key"))).await;
    let http = reqwest::Client::new();
    let session = create_session(&http, &base).await;

    let res = http
        .post(format!("{base}/api/sessions/{}/messages", session.id))
        .json(&json!({ "content": "hello" }))
        .send()
        .await
        .expect("send");
    assert_eq!(res.status(), StatusCode::OK);

    let turn: TurnResponse = res.json().await.expect("turn json");
    assert!(turn.error.expect("error").contains("invalid api key"));
    assert_eq!(turn.reply.answer, "");
    assert_eq!(turn.session.messages[2].content, "");
}

#[tokio::test]
async fn bad_requests_map_to_status_codes() {
    let base = spawn_app(Arc::new(MockChatClient::new())).await;
    let http = reqwest::Client::new();
    let session = create_session(&http, &base).await;

    let empty = http
        .post(format!("{base}/api/sessions/{}/messages", session.id))
        .json(&json!({ "content": "   " }))
        .send()
        .await
        .expect("send");
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = empty.json().await.expect("error json");
    assert!(body["error"].as_str().expect("message").contains("empty"));

    let unknown = http
        .post(format!("{base}/api/sessions/nope/reset"))
        .send()
        .await
        .expect("reset");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transcript_page_escapes_model_output() {
    let base = spawn_app(Arc::new(MockChatClient::new())).await;
    let http = reqwest::Client::new();
    let session = create_session(&http, &base).await;

    http.post(format!("{base}/api/sessions/{}/messages", session.id))
        .json(&json!({ "content": "<img src=x onerror=alert(1)>" }))
        .send()
        .await
        .expect("send");

    let html = http
        .get(format!("{base}/sessions/{}", session.id))
        .send()
        .await
        .expect("page")
        .text()
        .await
        .expect("body");

    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("<strong>Thinking:</strong>"));
}

#[tokio::test]
async fn idle_sessions_are_swept_until_shutdown() {
    let config = ContainerConfig {
        session_ttl_secs: 0,
        ..ContainerConfig::default()
    };
    let container = Arc::new(Container::with_chat_client(
        config,
        Arc::new(MockChatClient::new()),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = router(container.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let base = format!("http://{}", addr);
    let http = reqwest::Client::new();

    for _ in 0..20 {
        create_session(&http, &base).await;
    }
    assert_eq!(container.session_repo().count().await.expect("count"), 20);

    let shutdown = CancellationToken::new();
    let sweeper =
        spawn_session_sweeper(container.clone(), Duration::from_millis(10), shutdown.clone());
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(container.session_repo().count().await.expect("count"), 0);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(1), sweeper)
        .await
        .expect("sweeper stops on shutdown")
        .expect("sweeper task");
}

#[tokio::test]
async fn active_sessions_survive_the_sweep() {
    let container = Arc::new(Container::with_chat_client(
        ContainerConfig::default(),
        Arc::new(MockChatClient::new()),
    ));
    let session = container.start_session_use_case().execute().await.expect("start");

    let shutdown = CancellationToken::new();
    let sweeper =
        spawn_session_sweeper(container.clone(), Duration::from_millis(10), shutdown.clone());
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown.cancel();
    sweeper.await.expect("sweeper task");

    let found = container.transcript_use_case().execute(session.id()).await;
    assert!(found.is_ok());
}
