//! # Question Catalog
//!
//! The fixed, ordered list of interview questions. Built once at startup from
//! configuration and shared read-only by every session.

use serde::Serialize;

/// A single interview question.
///
/// `id` is the question's 1-based position in the catalog, so the first question
/// a session sees is always `id = 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
}

/// What a session should see next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position<'a> {
    /// The question at the session's cursor
    Question(&'a Question),
    /// The cursor is at or past the end of the catalog
    Completed,
}

#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog from question texts, numbering them in order.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let questions = texts
            .into_iter()
            .zip(1u32..)
            .map(|(text, id)| Question { id, text: text.into() })
            .collect();

        Self { questions }
    }

    /// Look up the question for a 0-based cursor.
    ///
    /// Cursors keep growing if a finished session keeps answering, so anything
    /// at or beyond `len()` is reported as `Completed` rather than an error.
    pub fn current(&self, cursor: usize) -> Position<'_> {
        match self.questions.get(cursor) {
            Some(question) => Position::Question(question),
            None => Position::Completed,
        }
    }

    pub fn is_completed(&self, cursor: usize) -> bool {
        cursor >= self.questions.len()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
