//! # Interview REST API Handlers
//!
//! The endpoints a mock interview frontend talks to.
//!
//! ## Available Endpoints:
//! - `POST /login` - Start a session for a named candidate
//! - `GET /questions/{session_id}` - Current question, or `{"completed": true}`
//! - `POST /submit/{session_id}` - Upload a recorded answer for the current question
//! - `POST /skip/{session_id}` - Move past the current question without answering
//! - `GET /sessions/{session_id}` - Progress and recorded answers for a session
//!
//! ## Flow:
//! login → (get question → submit | skip)* → get question returns `completed`

use crate::catalog::Position;
use crate::error::{AppError, AppResult};
use crate::session::Answer;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use futures_util::stream::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

/// Multipart field holding the recording.
pub const ANSWER_FIELD: &str = "answer";
/// Optional multipart text field holding the client-side transcript.
pub const TRANSCRIPT_FIELD: &str = "transcript";

pub const NO_AUDIO_FILE: &str = "No audio file provided";
pub const NO_SELECTED_FILE: &str = "No selected file";

/// Request body for `POST /login`.
///
/// `name` is optional at the type level so that a missing field produces our
/// "Name is required" error instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: Option<String>,
}

/// Start a new interview session.
///
/// ## Endpoint: `POST /login`
///
/// ## Request:
/// ```json
/// { "name": "Alice" }
/// ```
///
/// ## Response:
/// ```json
/// { "status": "ok", "session_id": "session_1", "name": "Alice" }
/// ```
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let name = body.into_inner().name.unwrap_or_default();
    let session_id = state.sessions.create(&name)?;

    info!(session_id = %session_id, name = %name, "Interview session created");

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "session_id": session_id,
        "name": name
    })))
}

/// Return the question at the session's cursor.
///
/// ## Endpoint: `GET /questions/{session_id}`
///
/// ## Response:
/// `{"id": 1, "text": "..."}` while questions remain, `{"completed": true}` afterwards.
pub async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let handle = state.sessions.get(&path)?;
    let cursor = handle.lock().await.current_question();

    match state.catalog.current(cursor) {
        Position::Question(question) => Ok(HttpResponse::Ok().json(question)),
        Position::Completed => Ok(HttpResponse::Ok().json(json!({ "completed": true }))),
    }
}

/// A file part from the upload form.
#[derive(Debug)]
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

/// The parts of the submit form we care about.
#[derive(Debug, Default)]
struct AnswerForm {
    file: Option<UploadedFile>,
    transcript: String,
}

/// Drain the multipart stream, keeping the first `answer` file part and the first
/// `transcript` text part.
///
/// A part only counts as a file when its Content-Disposition carries a `filename`
/// parameter, even an empty one. An `answer` part without one is treated as if no
/// file was sent at all.
async fn read_answer_form(mut payload: Multipart) -> AppResult<AnswerForm> {
    let mut form = AnswerForm::default();
    let mut transcript_seen = false;

    while let Some(item) = payload.next().await {
        let mut field = item?;

        let (name, filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().unwrap_or_default().to_string(),
                disposition.get_filename().map(str::to_string),
            ),
            None => (String::new(), None),
        };

        // every part is read to the end, even ones we discard
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk?);
        }

        match (name.as_str(), filename) {
            (ANSWER_FIELD, Some(filename)) if form.file.is_none() => {
                form.file = Some(UploadedFile { filename, bytes });
            }
            (TRANSCRIPT_FIELD, None) if !transcript_seen => {
                form.transcript = String::from_utf8_lossy(&bytes).into_owned();
                transcript_seen = true;
            }
            _ => {}
        }
    }

    Ok(form)
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Record an answer for the current question.
///
/// ## Endpoint: `POST /submit/{session_id}`
///
/// ## Request:
/// Multipart form data with a file field named "answer" and an optional text field
/// named "transcript".
///
/// ## Ordering:
/// The session lock is held from reading the cursor until the cursor moves, so the
/// file name and the recorded answer always refer to the same question. If the
/// write fails the session is left exactly as it was.
pub async fn submit_answer(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let session_id = path.into_inner();
    let handle = state.sessions.get(&session_id)?;

    // anything that isn't a multipart form cannot contain a file
    let form = if is_multipart(&req) {
        read_answer_form(payload).await?
    } else {
        AnswerForm::default()
    };

    let file = form
        .file
        .ok_or_else(|| AppError::ValidationError(NO_AUDIO_FILE.to_string()))?;

    if file.filename.is_empty() {
        return Err(AppError::ValidationError(NO_SELECTED_FILE.to_string()));
    }

    let mut session = handle.lock().await;
    session.ensure_open(state.answer_limit())?;

    let question_index = session.current_question();
    let audio_path = state
        .sink
        .store(&session_id, question_index, &file.bytes)
        .await
        .map_err(|err| {
            error!(
                session_id = %session_id,
                question_index,
                error = %err,
                "Failed to save answer recording"
            );
            AppError::from(err)
        })?;

    session.record(Answer::Recorded {
        audio_path: audio_path.display().to_string(),
        transcript: form.transcript,
    });

    info!(
        session_id = %session_id,
        question_index,
        bytes = file.bytes.len(),
        "Answer recorded"
    );

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Answer recorded successfully"
    })))
}

/// Skip the current question.
///
/// ## Endpoint: `POST /skip/{session_id}`
pub async fn skip_question(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let session_id = path.into_inner();
    let question_index = state
        .sessions
        .advance(&session_id, Answer::Skipped, state.answer_limit())
        .await?;

    info!(session_id = %session_id, question_index, "Question skipped");

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Question skipped"
    })))
}

/// Progress report for one session.
///
/// ## Endpoint: `GET /sessions/{session_id}`
///
/// ## Response:
/// ```json
/// {
///   "session_id": "session_1",
///   "name": "Alice",
///   "current_question": 1,
///   "total_questions": 5,
///   "completed": false,
///   "created_at": "2025-01-01T12:00:00+00:00",
///   "answers": [
///     { "audio_path": null, "transcript": "Question skipped", "skipped": true }
///   ]
/// }
/// ```
pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let session = state.sessions.snapshot(&path).await?;
    let cursor = session.current_question();

    Ok(HttpResponse::Ok().json(json!({
        "session_id": session.id,
        "name": session.name,
        "current_question": cursor,
        "total_questions": state.catalog.len(),
        "completed": state.catalog.is_completed(cursor),
        "created_at": session.created_at.to_rfc3339(),
        "answers": session.answers()
    })))
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::error::SAVE_FAILED_MESSAGE;
    use crate::handlers;
    use crate::middleware::MetricsMiddleware;
    use crate::sink::AnswerSink;
    use crate::state::AppState;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    const BOUNDARY: &str = "----mockinterviewboundary";

    fn test_state(config: AppConfig) -> (web::Data<AppState>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let sink = AnswerSink::new(dir.path().join("uploads")).unwrap();
        (web::Data::new(AppState::new(config, sink)), dir)
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .wrap(MetricsMiddleware)
                    .configure(handlers::configure),
            )
            .await
        };
    }

    enum Part<'a> {
        File { name: &'a str, filename: &'a str, data: &'a [u8] },
        Text { name: &'a str, value: &'a str },
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File { name, filename, data } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: audio/webm\r\n\r\n",
                            name, filename
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value).as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn submit_request(session_id: &str, parts: &[Part<'_>]) -> actix_http::Request {
        test::TestRequest::post()
            .uri(&format!("/submit/{}", session_id))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts))
            .to_request()
    }

    fn recording<'a>(data: &'a [u8]) -> Part<'a> {
        Part::File { name: "answer", filename: "recording.webm", data }
    }

    fn login_request(body: Value) -> actix_http::Request {
        test::TestRequest::post().uri("/login").set_json(body).to_request()
    }

    #[actix_web::test]
    async fn test_root_status() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);

        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[actix_web::test]
    async fn test_login_issues_sequential_sessions() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);

        let body: Value = test::call_and_read_body_json(&app, login_request(json!({"name": "Alice"}))).await;
        assert_eq!(body, json!({"status": "ok", "session_id": "session_1", "name": "Alice"}));

        let body: Value = test::call_and_read_body_json(&app, login_request(json!({"name": "Alice"}))).await;
        assert_eq!(body["session_id"], "session_2");

        let session = state.sessions.snapshot("session_2").await.unwrap();
        assert_eq!(session.current_question(), 0);
        assert!(session.answers().is_empty());
    }

    #[actix_web::test]
    async fn test_login_requires_name() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);

        for body in [json!({"name": ""}), json!({}), json!({"name": null})] {
            let resp = test::call_service(&app, login_request(body)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Name is required"}));
        }

        assert_eq!(state.sessions.len(), 0);
    }

    #[actix_web::test]
    async fn test_login_rejects_malformed_json() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert_eq!(state.sessions.len(), 0);
    }

    #[actix_web::test]
    async fn test_skipping_through_the_whole_interview() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let question = || test::TestRequest::get().uri("/questions/session_1").to_request();
        let skip = || test::TestRequest::post().uri("/skip/session_1").to_request();

        let body: Value = test::call_and_read_body_json(&app, question()).await;
        assert_eq!(body, json!({"id": 1, "text": "Tell me about yourself and your background."}));

        let body: Value = test::call_and_read_body_json(&app, skip()).await;
        assert_eq!(body, json!({"status": "ok", "message": "Question skipped"}));

        let body: Value = test::call_and_read_body_json(&app, question()).await;
        assert_eq!(body["id"], 2);

        for expected_id in 3..=5 {
            test::call_service(&app, skip()).await;
            let body: Value = test::call_and_read_body_json(&app, question()).await;
            assert_eq!(body["id"], expected_id);
        }
        test::call_service(&app, skip()).await;

        let body: Value = test::call_and_read_body_json(&app, question()).await;
        assert_eq!(body, json!({"completed": true}));

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 5);
        assert_eq!(session.answers().len(), 5);
        assert!(session.answers().iter().all(|a| a.is_skipped()));
    }

    #[actix_web::test]
    async fn test_question_is_stable_until_cursor_moves() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        for _ in 0..3 {
            let body: Value = test::call_and_read_body_json(
                &app,
                test::TestRequest::get().uri("/questions/session_1").to_request(),
            )
            .await;
            assert_eq!(body["id"], 1);
        }
    }

    #[actix_web::test]
    async fn test_unknown_session_is_not_found() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);

        let requests = vec![
            test::TestRequest::get().uri("/questions/session_9").to_request(),
            test::TestRequest::post().uri("/skip/session_9").to_request(),
            test::TestRequest::get().uri("/sessions/session_9").to_request(),
            submit_request("session_9", &[recording(b"audio")]),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "Invalid session"}));
        }
    }

    #[actix_web::test]
    async fn test_submit_records_answer_and_writes_file() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let req = submit_request(
            "session_1",
            &[recording(b"\x1a\x45\xdf\xa3webm"), Part::Text { name: "transcript", value: "I write Rust" }],
        );
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"status": "ok", "message": "Answer recorded successfully"}));

        let expected_path = state.sink.path_for("session_1", 0);
        assert_eq!(std::fs::read(&expected_path).unwrap(), b"\x1a\x45\xdf\xa3webm");

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 1);
        assert_eq!(session.answers()[0].audio_path(), Some(expected_path.display().to_string().as_str()));
        assert_eq!(session.answers()[0].transcript(), "I write Rust");

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/questions/session_1").to_request(),
        )
        .await;
        assert_eq!(body["id"], 2);
    }

    #[actix_web::test]
    async fn test_submit_without_transcript_stores_empty_text() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"audio")])).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.answers()[0].transcript(), "");
    }

    #[actix_web::test]
    async fn test_submit_without_file_does_not_advance() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let not_multipart = test::TestRequest::post()
            .uri("/submit/session_1")
            .set_json(json!({"transcript": "hello"}))
            .to_request();
        let requests = vec![
            submit_request("session_1", &[Part::Text { name: "transcript", value: "hello" }]),
            // an "answer" part with no filename parameter is a text field, not a file
            submit_request("session_1", &[Part::Text { name: "answer", value: "hello" }]),
            not_multipart,
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "No audio file provided"}));
        }

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 0);
        assert!(session.answers().is_empty());
    }

    #[actix_web::test]
    async fn test_submit_with_empty_filename() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let req = submit_request("session_1", &[Part::File { name: "answer", filename: "", data: b"audio" }]);
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "No selected file"}));

        assert_eq!(state.sessions.snapshot("session_1").await.unwrap().current_question(), 0);
    }

    #[actix_web::test]
    async fn test_file_name_follows_cursor() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;
        test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;
        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"third")])).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let session = state.sessions.snapshot("session_1").await.unwrap();
        let path = session.answers()[2].audio_path().unwrap().to_string();
        assert!(path.contains("session_1"));
        assert!(path.ends_with("session_1_q2.webm"));
        assert!(!state.sink.path_for("session_1", 1).exists());
        assert!(!state.sink.path_for("session_1", 3).exists());
        assert_eq!(std::fs::read(path).unwrap(), b"third");
    }

    #[actix_web::test]
    async fn test_failed_write_leaves_session_untouched() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        std::fs::remove_dir_all(state.sink.root()).unwrap();

        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"audio")])).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": SAVE_FAILED_MESSAGE}));

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 0);
        assert!(session.answers().is_empty());
    }

    #[actix_web::test]
    async fn test_answers_after_completion_are_accepted_by_default() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        for _ in 0..5 {
            test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;
        }

        let resp = test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"late")])).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.sink.path_for("session_1", 6).exists());

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/questions/session_1").to_request(),
        )
        .await;
        assert_eq!(body, json!({"completed": true}));

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 7);
        assert_eq!(session.answers().len(), 7);
    }

    #[actix_web::test]
    async fn test_answers_after_completion_rejected_when_configured() {
        let mut config = AppConfig::default();
        config.interview.questions = vec!["Only question?".into()];
        config.interview.reject_after_completion = true;
        let (state, _dir) = test_state(config);
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;

        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"audio")])).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Interview already completed"}));

        let resp = test::call_service(&app, submit_request("session_1", &[recording(b"again")])).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert!(!state.sink.path_for("session_1", 1).exists());

        let session = state.sessions.snapshot("session_1").await.unwrap();
        assert_eq!(session.current_question(), 1);
        assert_eq!(session.answers().len(), 1);
    }

    #[actix_web::test]
    async fn test_session_summary() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;
        test::call_service(&app, test::TestRequest::post().uri("/skip/session_1").to_request()).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/sessions/session_1").to_request(),
        )
        .await;

        assert_eq!(body["session_id"], "session_1");
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["current_question"], 1);
        assert_eq!(body["total_questions"], 5);
        assert_eq!(body["completed"], false);
        assert!(body["created_at"].is_string());
        assert_eq!(
            body["answers"],
            json!([{"audio_path": null, "transcript": "Question skipped", "skipped": true}])
        );
    }

    #[actix_web::test]
    async fn test_metrics_grouped_by_route() {
        let (state, _dir) = test_state(AppConfig::default());
        let app = test_app!(state);
        test::call_service(&app, login_request(json!({"name": "Alice"}))).await;
        test::call_service(&app, login_request(json!({"name": "Bob"}))).await;
        test::call_service(&app, test::TestRequest::get().uri("/questions/session_1").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/questions/session_2").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/questions/missing").to_request()).await;

        let metrics = state.get_metrics_snapshot();
        assert_eq!(metrics.request_count, 5);
        assert_eq!(metrics.error_count, 1);

        let questions = &metrics.endpoint_metrics["GET /questions/{session_id}"];
        assert_eq!(questions.request_count, 3);
        assert_eq!(questions.error_count, 1);
        assert_eq!(metrics.endpoint_metrics["POST /login"].request_count, 2);

        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(body["interview"]["sessions"], 2);
        assert_eq!(body["interview"]["total_questions"], 5);
    }
}
