//! # Interview Session Management
//!
//! Tracks every interview in progress: who is being interviewed, which question they
//! are on, and what happened to each question so far (answered or skipped).
//!
//! ## Session Lifecycle:
//! 1. **Created**: `login` allocates a session with the cursor at 0
//! 2. **In progress**: each submit or skip appends one answer and moves the cursor forward
//! 3. **Completed**: the cursor has reached the end of the question catalog
//!
//! Sessions are never removed; they live as long as the process does.
//!
//! ## Locking:
//! The id → session map sits behind a `std::sync::RwLock` that is only held long enough
//! to look up or insert an entry. Each session then has its own `tokio::sync::Mutex`, so
//! requests for one session run one at a time (a submit can hold the lock across its
//! file write) while other sessions are untouched.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// Transcript stored for a skipped question.
pub const SKIPPED_TRANSCRIPT: &str = "Question skipped";

pub const INVALID_SESSION: &str = "Invalid session";
pub const NAME_REQUIRED: &str = "Name is required";
pub const ALREADY_COMPLETED: &str = "Interview already completed";

/// Outcome recorded for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// The candidate uploaded a recording
    Recorded { audio_path: String, transcript: String },
    /// The candidate moved on without answering
    Skipped,
}

impl Answer {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Answer::Skipped)
    }

    pub fn audio_path(&self) -> Option<&str> {
        match self {
            Answer::Recorded { audio_path, .. } => Some(audio_path),
            Answer::Skipped => None,
        }
    }

    pub fn transcript(&self) -> &str {
        match self {
            Answer::Recorded { transcript, .. } => transcript,
            Answer::Skipped => SKIPPED_TRANSCRIPT,
        }
    }
}

/// Wire form of an answer. Skips carry `"audio_path": null` and `"skipped": true`;
/// recorded answers leave `skipped` out entirely.
#[derive(Serialize)]
struct AnswerRecord<'a> {
    audio_path: Option<&'a str>,
    transcript: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    skipped: bool,
}

impl Serialize for Answer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AnswerRecord {
            audio_path: self.audio_path(),
            transcript: self.transcript(),
            skipped: self.is_skipped(),
        }
        .serialize(serializer)
    }
}

/// Progress of one candidate through the interview.
///
/// The cursor and the answer list only change together through [`Session::record`],
/// which keeps `answers.len() == current_question` true at all times.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    current_question: usize,
    answers: Vec<Answer>,
}

impl Session {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
            current_question: 0,
            answers: Vec::new(),
        }
    }

    /// 0-based index of the next unanswered question.
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Append an answer for the current question and move to the next one.
    /// Returns the index the answer was recorded against.
    pub fn record(&mut self, answer: Answer) -> usize {
        let index = self.current_question;
        self.answers.push(answer);
        self.current_question += 1;
        index
    }

    /// Refuse new answers once the cursor has reached `limit`.
    ///
    /// `None` means no limit: finished sessions keep accepting answers and the
    /// cursor simply runs past the end of the catalog.
    pub fn ensure_open(&self, limit: Option<usize>) -> AppResult<()> {
        match limit {
            Some(limit) if self.current_question >= limit => {
                Err(AppError::AlreadyCompleted(ALREADY_COMPLETED.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Shared, lockable reference to a single session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Owns every session in the process.
///
/// ## Id generation:
/// Ids are `session_<n>` with `n` taken from a monotonic counter, so two logins can
/// never receive the same id, even when they race.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    next_id: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Start a new interview for `name`.
    ///
    /// ## Returns:
    /// - **Ok(session_id)**: Session created with the cursor at 0 and no answers
    /// - **Err(ValidationError)**: `name` was empty; nothing is created and no id is used up
    pub fn create(&self, name: &str) -> AppResult<String> {
        if name.is_empty() {
            return Err(AppError::ValidationError(NAME_REQUIRED.to_string()));
        }

        let id = format!("session_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = Session::new(id.clone(), name.to_string());

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::new(Mutex::new(session)));

        Ok(id)
    }

    /// Get a session by id.
    pub fn get(&self, id: &str) -> AppResult<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(INVALID_SESSION.to_string()))
    }

    /// Copy of the session's current state.
    pub async fn snapshot(&self, id: &str) -> AppResult<Session> {
        let handle = self.get(id)?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Record `answer` against the session's current question and advance the cursor.
    ///
    /// The limit check and the append happen under the same lock, so concurrent
    /// calls cannot both slip past the last question.
    pub async fn advance(&self, id: &str, answer: Answer, limit: Option<usize>) -> AppResult<usize> {
        let handle = self.get(id)?;
        let mut session = handle.lock().await;
        session.ensure_open(limit)?;
        Ok(session.record(answer))
    }

    /// Number of sessions created since startup.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
