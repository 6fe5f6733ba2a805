mod mocks;

use mocks::{
    backend::MockBackend,
    fetcher::{MockFetcher, StalledFetcher},
};
use std::sync::Arc;
use std::time::Duration;
use tubenotes::config::Prompts;
use tubenotes::orchestrator::Orchestrator;
use tubenotes::session::{Session, SessionInfo, SessionState, SessionStore};
use tubenotes::NotesError;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
const SHORT_URL: &str = "https://youtu.be/9bZkp7q19f0";

fn build_orchestrator(fetcher: MockFetcher, backend: MockBackend) -> Orchestrator {
    Orchestrator::with_components(Arc::new(fetcher), Arc::new(backend), Prompts::default())
}

// ─── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_notes_then_question() {
    let fetcher = MockFetcher::new("We talk about rust. Then we talk about async");
    let backend = MockBackend::new("A video about Rust.");
    let fetch_calls = fetcher.calls.clone();
    let backend_calls = backend.calls.clone();
    let orchestrator = build_orchestrator(fetcher, backend);

    let mut session = Session::new();
    assert!(!session.can_ask());

    let notes = session.get_notes(&orchestrator, WATCH_URL).await.unwrap();
    assert_eq!(notes.video_id.as_str(), "dQw4w9WgXcQ");
    assert_eq!(notes.summary.as_str(), "A video about Rust.");
    assert!(session.can_ask());
    assert_eq!(*fetch_calls.lock().unwrap(), vec!["dQw4w9WgXcQ".to_string()]);

    {
        let calls = backend_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "You are a helpful assistant");
        assert!(calls[0].user.contains("within 250 words"));
        assert!(calls[0]
            .user
            .ends_with("We talk about rust Then we talk about async"));
    }

    let answer = session
        .submit_question(&orchestrator, "What is the main topic?")
        .await
        .unwrap();
    assert_eq!(answer, "A video about Rust.");

    let calls = backend_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1].user,
        "Summary: A video about Rust.\n\nQuestion: What is the main topic?\n\nAnswer:"
    );
}

#[tokio::test]
async fn test_second_link_replaces_notes() {
    let orchestrator = build_orchestrator(
        MockFetcher::new("Some transcript"),
        MockBackend::new("Notes"),
    );

    let mut session = Session::new();
    session.get_notes(&orchestrator, WATCH_URL).await.unwrap();
    session.get_notes(&orchestrator, SHORT_URL).await.unwrap();

    let notes = session.notes().unwrap();
    assert_eq!(notes.video_id.as_str(), "9bZkp7q19f0");
}

// ─── Failures keep the previous state ────────────────────────────────────────

#[tokio::test]
async fn test_disabled_transcripts_leave_session_without_summary() {
    let fetcher = MockFetcher::failing(|id| NotesError::TranscriptsDisabled {
        video_id: id.to_string(),
    });
    let backend = MockBackend::new("unused");
    let backend_calls = backend.calls.clone();
    let orchestrator = build_orchestrator(fetcher, backend);

    let mut session = Session::new();
    let err = session.get_notes(&orchestrator, WATCH_URL).await.unwrap_err();

    assert_eq!(err.to_string(), "Subtitles are disabled for this video.");
    assert!(matches!(session.state(), SessionState::NoSummary));
    assert!(backend_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_existing_notes() {
    let orchestrator = build_orchestrator(
        MockFetcher::new("Some transcript"),
        MockBackend::new("First notes"),
    );
    let mut session = Session::new();
    session.get_notes(&orchestrator, WATCH_URL).await.unwrap();

    let failing = build_orchestrator(
        MockFetcher::failing(|id| NotesError::NoTranscriptFound {
            video_id: id.to_string(),
        }),
        MockBackend::new("unused"),
    );
    let err = session.get_notes(&failing, SHORT_URL).await.unwrap_err();
    assert_eq!(err.to_string(), "No transcript found for this video.");

    let notes = session.notes().unwrap();
    assert_eq!(notes.video_id.as_str(), "dQw4w9WgXcQ");
    assert_eq!(notes.summary.as_str(), "First notes");
}

#[tokio::test]
async fn test_empty_transcript_is_never_summarized() {
    let fetcher = MockFetcher::empty();
    let backend = MockBackend::new("unused");
    let backend_calls = backend.calls.clone();
    let orchestrator = build_orchestrator(fetcher, backend);

    let mut session = Session::new();
    let err = session.get_notes(&orchestrator, WATCH_URL).await.unwrap_err();

    assert_eq!(err.to_string(), "No transcript found for this video.");
    assert!(backend_calls.lock().unwrap().is_empty());
    assert!(matches!(session.state(), SessionState::NoSummary));
}

#[tokio::test]
async fn test_cancelled_refresh_keeps_existing_notes() {
    let orchestrator = build_orchestrator(
        MockFetcher::new("Some transcript"),
        MockBackend::new("First notes"),
    );
    let mut session = Session::new();
    session.get_notes(&orchestrator, WATCH_URL).await.unwrap();

    let stalled = Orchestrator::with_components(
        Arc::new(StalledFetcher),
        Arc::new(MockBackend::new("unused")),
        Prompts::default(),
    );
    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        session.get_notes(&stalled, SHORT_URL),
    )
    .await;
    assert!(outcome.is_err());

    let notes = session.notes().unwrap();
    assert_eq!(notes.video_id.as_str(), "dQw4w9WgXcQ");
    assert_eq!(notes.summary.as_str(), "First notes");
}

#[tokio::test]
async fn test_invalid_link_never_fetches() {
    let fetcher = MockFetcher::new("unused");
    let fetch_calls = fetcher.calls.clone();
    let orchestrator = build_orchestrator(fetcher, MockBackend::new("unused"));

    let mut session = Session::new();
    let err = session
        .get_notes(&orchestrator, "https://example.com/short")
        .await
        .unwrap_err();

    assert!(matches!(err, NotesError::InvalidUrlFormat { .. }));
    assert!(fetch_calls.lock().unwrap().is_empty());
    assert!(!session.can_ask());
}

#[tokio::test]
async fn test_generation_failure_is_not_expected() {
    let orchestrator = build_orchestrator(
        MockFetcher::new("Some transcript"),
        MockBackend::failing("connection reset"),
    );

    let mut session = Session::new();
    let err = session.get_notes(&orchestrator, WATCH_URL).await.unwrap_err();

    assert!(matches!(err, NotesError::UpstreamGeneration(_)));
    assert!(!err.is_expected());
    assert!(!session.can_ask());
}

// ─── Question validation ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_question_without_summary_is_rejected() {
    let backend = MockBackend::new("unused");
    let backend_calls = backend.calls.clone();
    let orchestrator = build_orchestrator(MockFetcher::new("unused"), backend);

    let session = Session::new();
    let err = session
        .submit_question(&orchestrator, "What is it about?")
        .await
        .unwrap_err();

    assert!(matches!(err, NotesError::NoSummary));
    assert!(backend_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_question_never_reaches_backend() {
    let backend = MockBackend::new("Notes");
    let backend_calls = backend.calls.clone();
    let orchestrator = build_orchestrator(MockFetcher::new("Some transcript"), backend);

    let mut session = Session::new();
    session.get_notes(&orchestrator, WATCH_URL).await.unwrap();
    assert_eq!(backend_calls.lock().unwrap().len(), 1);

    let err = session
        .submit_question(&orchestrator, "   \n\t")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Please enter a valid question before submitting."
    );
    assert_eq!(backend_calls.lock().unwrap().len(), 1);
    assert!(session.can_ask());
}

// ─── Session store ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sessions_do_not_share_notes() {
    let orchestrator = build_orchestrator(
        MockFetcher::new("Some transcript"),
        MockBackend::new("Notes"),
    );
    let store = SessionStore::new(Duration::from_secs(3600));
    let first = store.create().await;
    let second = store.create().await;

    {
        let session = store.get(first).await.unwrap();
        let mut session = session.lock().await;
        session.get_notes(&orchestrator, WATCH_URL).await.unwrap();
    }

    let first_info = SessionInfo::from(&*store.get(first).await.unwrap().lock().await);
    let second_info = SessionInfo::from(&*store.get(second).await.unwrap().lock().await);
    assert_eq!(first_info.state, "has_summary");
    assert_eq!(second_info.state, "no_summary");

    store.remove(first).await.unwrap();
    assert!(matches!(
        store.get(first).await,
        Err(NotesError::SessionNotFound(_))
    ));
    assert_eq!(store.len().await, 1);
}
