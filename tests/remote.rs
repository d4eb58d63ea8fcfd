use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use mood_journal::auth::LoginOutcome;
use mood_journal::errors::GatewayError;
use mood_journal::gateway::{RemoteGateway, RequestOptions};
use mood_journal::models::{ClassificationSource, Emotion, LoginForm};
use mood_journal::storage::LocalStorage;
use mood_journal::MoodJournal;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Backend {
    journal_status: StatusCode,
    journal_body: Value,
    seen: Arc<Mutex<Vec<Seen>>>,
}

#[derive(Debug, Clone)]
struct Seen {
    authorization: Option<String>,
    content_type: Option<String>,
    body: Value,
}

impl Backend {
    fn answering(status: StatusCode, body: Value) -> Self {
        Self {
            journal_status: status,
            journal_body: body,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn journal_calls(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn journals(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.seen.lock().unwrap().push(Seen {
        authorization: header(&headers, "authorization"),
        content_type: header(&headers, "content-type"),
        body,
    });
    (backend.journal_status, Json(backend.journal_body.clone()))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "ada@example.com" && body["password"] == "engine1" {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": "remote-token",
                "user": { "id": 42, "name": "Ada", "email": "ada@example.com" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid email or password" })),
        )
    }
}

async fn bare_failure() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn spawn_backend(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/api/journals", post(journals))
        .route("/api/login", post(login))
        .route("/api/broken", post(bare_failure))
        .with_state(backend);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn unused_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

fn journal_against(base: String) -> MoodJournal {
    let gateway = RemoteGateway::new(base, Duration::from_secs(5)).unwrap();
    MoodJournal::new(LocalStorage::in_memory(), Some(gateway))
}

async fn log_in(journal: &mut MoodJournal) {
    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "engine1".to_string(),
    };
    match journal.login(&form).await.unwrap() {
        LoginOutcome::LoggedIn { user, .. } => assert_eq!(user.id, 42),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn session_routes_submission_to_backend() {
    let backend = Backend::answering(
        StatusCode::CREATED,
        json!({ "success": true, "entry": { "text": "x", "emotion": "joy", "score": 0.93 } }),
    );
    let mut journal = journal_against(spawn_backend(backend.clone()).await);
    log_in(&mut journal).await;

    let submission = journal.submit("what a morning").await.unwrap();
    assert_eq!(submission.source, ClassificationSource::Remote);
    assert_eq!(submission.entry.emotion, Emotion::Happy);
    assert_eq!(submission.entry.score, 93);
    assert_eq!(journal.entries().entries()[0], submission.entry);

    let calls = backend.journal_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer remote-token"));
    assert_eq!(calls[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(calls[0].body, json!({ "text": "what a morning", "email": "ada@example.com" }));
}

#[tokio::test]
async fn percentage_scores_are_kept_as_percentages() {
    let backend = Backend::answering(
        StatusCode::OK,
        json!({ "entry": { "text": "x", "emotion": "Sadness", "score": 72.4 } }),
    );
    let mut journal = journal_against(spawn_backend(backend).await);
    log_in(&mut journal).await;

    let submission = journal.submit("rainy").await.unwrap();
    assert_eq!(submission.entry.emotion, Emotion::Sad);
    assert_eq!(submission.entry.score, 72);
}

#[tokio::test]
async fn server_error_falls_back_to_local_classifier() {
    let backend = Backend::answering(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "success": false, "message": "model offline" }),
    );
    let mut journal = journal_against(spawn_backend(backend.clone()).await);
    log_in(&mut journal).await;

    let submission = journal.submit("I'm so happy today").await.unwrap();
    assert_eq!(submission.source, ClassificationSource::Local);
    assert_eq!(submission.entry.emotion, Emotion::Happy);
    assert!((75..=95).contains(&submission.entry.score));
    assert_eq!(backend.journal_calls().len(), 1);
}

#[tokio::test]
async fn malformed_success_falls_back_to_local_classifier() {
    let backend = Backend::answering(StatusCode::OK, json!({ "success": true }));
    let mut journal = journal_against(spawn_backend(backend).await);
    log_in(&mut journal).await;

    let submission = journal.submit("nothing special happened").await.unwrap();
    assert_eq!(submission.source, ClassificationSource::Local);
    assert_eq!(submission.entry.emotion, Emotion::Neutral);
}

#[tokio::test]
async fn no_session_means_no_network_call() {
    let backend = Backend::answering(
        StatusCode::OK,
        json!({ "entry": { "text": "x", "emotion": "joy", "score": 0.5 } }),
    );
    let mut journal = journal_against(spawn_backend(backend.clone()).await);
    assert!(journal.session().is_none());

    let submission = journal.submit("feeling content").await.unwrap();
    assert_eq!(submission.source, ClassificationSource::Local);
    assert_eq!(submission.entry.emotion, Emotion::Content);
    assert!(backend.journal_calls().is_empty());
}

#[tokio::test]
async fn rejected_remote_login_uses_mock_accounts() {
    let backend = Backend::answering(StatusCode::OK, json!({}));
    let mut journal = journal_against(spawn_backend(backend).await);

    let form = LoginForm {
        email: "demo@moodtracker.com".to_string(),
        password: "demo123".to_string(),
    };
    match journal.login(&form).await.unwrap() {
        LoginOutcome::LoggedIn { user, .. } => assert_eq!(user.name, "Demo User"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn gateway_reports_server_message_or_status() {
    let backend = Backend::answering(
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "message": "Text is required" }),
    );
    let base = spawn_backend(backend).await;
    let gateway = RemoteGateway::new(base, Duration::from_secs(5)).unwrap();

    let err = gateway
        .request("/journals", RequestOptions::post(json!({ "text": "" })))
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::RequestFailed("Text is required".to_string()));

    let err = gateway
        .request("/broken", RequestOptions::post(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err, GatewayError::RequestFailed("Request failed (503)".to_string()));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let gateway = RemoteGateway::new(unused_base(), Duration::from_secs(2)).unwrap();
    let err = gateway
        .request("/login", RequestOptions::post(json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "got {err:?}");
}
