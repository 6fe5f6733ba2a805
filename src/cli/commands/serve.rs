//! HTTP API server for integration with other systems.
//!
//! Every client works in its own session, so the notes of one client are
//! never visible to another.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::NotesError;
use crate::orchestrator::Orchestrator;
use crate::session::{SessionInfo, SessionStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
    sessions: SessionStore,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Generate, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubenotes doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let idle_timeout = Duration::from_secs(settings.server.session_idle_secs);
    let state = Arc::new(AppState {
        orchestrator,
        sessions: SessionStore::new(idle_timeout),
    });
    spawn_session_sweeper(state.clone(), idle_timeout);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state.clone()).layer(cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("tubenotes API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", state.orchestrator.model());
    Output::kv(
        "Idle sessions",
        &format!("dropped after {}s", idle_timeout.as_secs()),
    );
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("Preview", "GET    /preview?url=...");
    Output::kv("New session", "POST   /sessions");
    Output::kv("Session", "GET    /sessions/{id}");
    Output::kv("End session", "DELETE /sessions/{id}");
    Output::kv("Get notes", "POST   /sessions/{id}/notes");
    Output::kv("Ask", "POST   /sessions/{id}/questions");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop sessions nobody has touched within `idle_timeout`.
fn spawn_session_sweeper(state: Arc<AppState>, idle_timeout: Duration) {
    let period = (idle_timeout / 4).clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let evicted = state.sessions.evict_idle().await;
            if evicted > 0 {
                let remaining = state.sessions.len().await;
                info!(
                    evicted,
                    remaining,
                    "Evicted idle sessions"
                );
            }
        }
    });
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/preview", get(preview))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/notes", post(get_notes))
        .route("/sessions/{id}/questions", post(submit_question))
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct PreviewQuery {
    url: String,
}

#[derive(Deserialize)]
struct NotesRequest {
    /// YouTube link
    url: String,
}

#[derive(Serialize)]
struct NotesResponse {
    video_id: String,
    thumbnail_url: String,
    summary: String,
}

#[derive(Deserialize)]
struct QuestionRequest {
    question: String,
}

#[derive(Serialize)]
struct QuestionResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

/// HTTP status and machine-readable kind for a pipeline error.
fn error_status(err: &NotesError) -> (StatusCode, &'static str) {
    match err {
        NotesError::InvalidUrlFormat { .. } => (StatusCode::BAD_REQUEST, "invalid_url_format"),
        NotesError::EmptyQuestion => (StatusCode::BAD_REQUEST, "empty_question"),
        NotesError::NoSummary => (StatusCode::CONFLICT, "no_summary"),
        NotesError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
        NotesError::TranscriptsDisabled { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "transcripts_disabled")
        }
        NotesError::NoTranscriptFound { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "no_transcript_found")
        }
        NotesError::UpstreamBlocked(_) => (StatusCode::SERVICE_UNAVAILABLE, "upstream_blocked"),
        NotesError::UnknownFetch(_) => (StatusCode::BAD_GATEWAY, "unknown_fetch_error"),
        NotesError::UpstreamGeneration(_) => (StatusCode::BAD_GATEWAY, "upstream_generation_error"),
        NotesError::Config(_)
        | NotesError::Io(_)
        | NotesError::Json(_)
        | NotesError::TomlParse(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

fn error_response(err: NotesError) -> Response {
    let (status, kind) = error_status(&err);
    if status.is_server_error() {
        warn!(kind, "Request failed: {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind,
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    match state.orchestrator.preview(&query.url) {
        Ok(preview) => Json(preview).into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_session(State(state): State<Arc<AppState>>) -> Response {
    let id = state.sessions.create().await;
    match state.sessions.get(id).await {
        Ok(session) => {
            let info = SessionInfo::from(&*session.lock().await);
            (StatusCode::CREATED, Json(info)).into_response()
        }
        Err(e) => error_response(e),
    }
}

async fn get_session(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.get(id).await {
        Ok(session) => Json(SessionInfo::from(&*session.lock().await)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_session(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.remove(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_notes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<NotesRequest>,
) -> Response {
    let session = match state.sessions.get(id).await {
        Ok(session) => session,
        Err(e) => return error_response(e),
    };

    let mut session = session.lock().await;
    match session.get_notes(&state.orchestrator, &req.url).await {
        Ok(notes) => Json(NotesResponse {
            thumbnail_url: notes.video_id.thumbnail_url(),
            video_id: notes.video_id.to_string(),
            summary: notes.summary.to_string(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn submit_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuestionRequest>,
) -> Response {
    let session = match state.sessions.get(id).await {
        Ok(session) => session,
        Err(e) => return error_response(e),
    };

    let session = session.lock().await;
    match session.submit_question(&state.orchestrator, &req.question).await {
        Ok(answer) => Json(QuestionResponse { answer }).into_response(),
        Err(e) => error_response(e),
    }
}
