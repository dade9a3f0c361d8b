use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::connector::api::Container;
use crate::domain::DomainError;

use super::page::{render_transcript_html, INDEX_HTML};
use super::views::{SendMessageRequest, SessionView, TurnResponse};

/// Maps domain failures onto HTTP statuses with a `{"error": ...}` body.
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Builds the chat UI routes over a shared container.
pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/sessions/{id}", get(transcript_page))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(end_session))
        .route("/api/sessions/{id}/messages", post(send_message))
        .route("/api/sessions/{id}/reset", post(reset_session))
        .with_state(container)
}

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically expires idle sessions until `shutdown` is cancelled.
pub fn spawn_session_sweeper(
    container: Arc<Container>,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let expire = container.expire_sessions_use_case();
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = expire.execute().await {
                        warn!("Session sweep failed: {}", e);
                    }
                }
            }
        }
    })
}

/// Serves the UI until `shutdown` is cancelled.
pub async fn serve(
    container: Arc<Container>,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Chat UI listening on http://{}", listener.local_addr()?);

    let sweeper = spawn_session_sweeper(container.clone(), SWEEP_INTERVAL, shutdown.clone());

    axum::serve(listener, router(container))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    sweeper.await?;

    info!("Chat UI stopped");
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "ok"
}

async fn create_session(
    State(container): State<Arc<Container>>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let session = container.start_session_use_case().execute().await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::from_session(&session, container.segment_mode())),
    ))
}

async fn get_session(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionView>> {
    let session = container.transcript_use_case().execute(&id).await?;
    Ok(Json(SessionView::from_session(&session, container.segment_mode())))
}

async fn transcript_page(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let session = container.transcript_use_case().execute(&id).await?;
    let view = SessionView::from_session(&session, container.segment_mode());
    Ok(Html(render_transcript_html(&view)))
}

async fn send_message(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<TurnResponse>> {
    let (session, turn) = container
        .send_message_use_case()
        .execute(&id, &request.content)
        .await?;
    Ok(Json(TurnResponse::new(&session, &turn, container.segment_mode())))
}

async fn reset_session(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionView>> {
    let session = container.reset_session_use_case().execute(&id).await?;
    Ok(Json(SessionView::from_session(&session, container.segment_mode())))
}

async fn end_session(
    State(container): State<Arc<Container>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    container.end_session_use_case().execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
