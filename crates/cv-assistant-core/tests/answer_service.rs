//! Drives the HTTP client and dispatcher against a local stub answer service.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use cv_assistant_core::{
    AskClient, AskError, ChatMessage, Dispatcher, Session, Viewport, DEFAULT_PROFILE,
    FALLBACK_ERROR_TEXT,
};
use serde_json::{json, Value};

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/ask", addr)
}

/// Replies with a markdown answer that quotes the question back
async fn skills_answer(Json(body): Json<Value>) -> Json<Value> {
    let question = body["question"].as_str().unwrap_or_default();
    Json(json!({ "answer": format!("**Skills** ({})\n\n\n\n   C#, .NET", question) }))
}

#[tokio::test]
async fn test_client_posts_question_and_reads_answer() {
    let url = spawn_stub(Router::new().route("/ask", post(skills_answer))).await;
    let client = AskClient::new(&url);

    let answer = client.post_question("Teknik yetkinlikleriniz neler?").await.unwrap();

    // raw answer comes back untouched; cleanup happens in the session
    assert_eq!(
        answer,
        "**Skills** (Teknik yetkinlikleriniz neler?)\n\n\n\n   C#, .NET"
    );
}

#[tokio::test]
async fn test_end_to_end_success() {
    let url = spawn_stub(Router::new().route("/ask", post(skills_answer))).await;
    let dispatcher = Dispatcher::new(AskClient::new(&url));
    let mut session = Session::from_profile(&DEFAULT_PROFILE, Viewport::new(1280));
    assert_eq!(session.messages().len(), 1);

    let appended = dispatcher.submit(&mut session, "Teknik yetkinlikleriniz neler?").await;

    let expected = "**Skills** (Teknik yetkinlikleriniz neler?)\n\nC#, .NET";
    assert_eq!(appended.as_deref(), Some(expected));
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.messages()[2], ChatMessage::assistant(expected));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_server_error_status() {
    async fn fail() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "model offline")
    }
    let url = spawn_stub(Router::new().route("/ask", post(fail))).await;

    let err = AskClient::new(&url).post_question("soru").await.unwrap_err();
    match err {
        AskError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "model offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    async fn garbage() -> &'static str {
        "<html>not json</html>"
    }
    let url = spawn_stub(Router::new().route("/ask", post(garbage))).await;

    let err = AskClient::new(&url).post_question("soru").await.unwrap_err();
    assert!(matches!(err, AskError::Decode(_)), "{err}");
}

#[tokio::test]
async fn test_missing_answer_field() {
    async fn no_answer() -> Json<Value> {
        Json(json!({ "detail": "nothing here" }))
    }
    let url = spawn_stub(Router::new().route("/ask", post(no_answer))).await;

    let err = AskClient::new(&url).post_question("soru").await.unwrap_err();
    assert!(matches!(err, AskError::MissingAnswer), "{err}");
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = AskClient::new(&format!("http://{}/ask", addr));
    assert!(matches!(
        client.post_question("soru").await,
        Err(AskError::Transport(_))
    ));

    let dispatcher = Dispatcher::new(client);
    let mut session = Session::from_profile(&DEFAULT_PROFILE, Viewport::new(1280));
    let appended = dispatcher.submit(&mut session, "soru").await;

    assert_eq!(appended.as_deref(), Some(FALLBACK_ERROR_TEXT));
    assert_eq!(session.messages().len(), 3);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_narrow_panel_scenario() {
    let url = spawn_stub(Router::new().route("/ask", post(skills_answer))).await;
    let dispatcher = Dispatcher::new(AskClient::new(&url));
    let mut session = Session::from_profile(&DEFAULT_PROFILE, Viewport::new(700));

    assert!(!session.panel().is_open());
    session.open_panel();
    assert!(session.panel().is_open());

    let pending = session.begin_submit("Eğitim geçmişinizi paylaşabilir misiniz?").unwrap();
    assert!(!session.panel().is_open());

    let task = dispatcher.spawn(&pending);
    dispatcher.settle(&mut session, pending, task).await;
    assert_eq!(session.messages().len(), 3);
}
