//! # Answer Storage
//!
//! Writes uploaded answer recordings to the upload directory. One file per
//! (session, question index), named `<session_id>_q<index>.webm`.
//!
//! The name the client gave its upload is never used here: storage names come only
//! from the session id (which we generated) and the cursor, so a crafted filename
//! cannot escape the upload directory.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AnswerSink {
    root: PathBuf,
}

impl AnswerSink {
    /// Open the sink, creating the upload directory (and parents) if needed.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the answer for `question_index` of `session_id` lives.
    pub fn path_for(&self, session_id: &str, question_index: usize) -> PathBuf {
        self.root.join(format!("{}_q{}.webm", session_id, question_index))
    }

    /// Write `blob` verbatim and return its path. An existing file for the same
    /// pair is overwritten. Failures are returned as-is and never retried.
    pub async fn store(&self, session_id: &str, question_index: usize, blob: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(session_id, question_index);
        tokio::fs::write(&path, blob).await?;

        debug!(
            session_id = %session_id,
            question_index,
            bytes = blob.len(),
            path = %path.display(),
            "Answer recording saved"
        );

        Ok(path)
    }
}
