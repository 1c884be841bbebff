//! Error taxonomy for the dashboard core.
//!
//! Routes map `SubjectNotFound` to 404 and everything else to a generic 500;
//! no storage detail leaks past the route boundary.

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Referenced subject does not exist.
    #[error("subject not found: {0}")]
    SubjectNotFound(Uuid),

    /// Referenced question does not exist (write path only).
    #[error("question not found: {0}")]
    QuestionNotFound(Uuid),

    /// A task answer's denormalized subject does not match its question's subject.
    #[error("task answer for question {question_id} carries subject {got}, question belongs to {expected}")]
    SubjectMismatch {
        question_id: Uuid,
        expected: Uuid,
        got: Uuid,
    },

    /// Storage failure (connection or query).
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
