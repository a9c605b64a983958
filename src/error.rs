//! Crate error type
//!
//! Gate verdicts (match/mismatch) are game results and never travel through here.

use crate::session::Screen;

/// Result alias carrying [`QuizError`]
pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// A session cannot start without questions
    #[error("question set is empty")]
    EmptyQuestionSet,

    #[error("question {id} has correct index {index}, expected 0..=2")]
    CorrectIndexOutOfRange { id: u32, index: u8 },

    /// A forced draw order is not a permutation of the question set
    #[error("draw order is not a permutation of {len} questions")]
    InvalidOrder { len: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("cannot {action} from {from:?}")]
    InvalidTransition { from: Screen, action: &'static str },

    /// A driven run never reached an outcome
    #[error("run did not finish within {frames} frames")]
    RunStalled { frames: u32 },

    #[error("storage error: {0}")]
    Storage(String),

    /// Browser API unavailable or refused a call
    #[error("platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
