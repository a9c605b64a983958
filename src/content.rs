//! Question content
//!
//! The question bank itself is supplied by the host; this module only defines
//! its shape and validates it before a session may start.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::sim::Lane;

/// Training topic a question belongs to (drives the gate icon)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "Desconto")]
    Discount,
    #[serde(alias = "Travesseiro")]
    Pillow,
    #[serde(alias = "Frete")]
    Shipping,
    #[serde(alias = "Comissão")]
    Commission,
    #[serde(alias = "Atendimento")]
    Service,
}

/// One multiple-choice question; answers are ordered left, center, right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub text: String,
    pub answers: [String; 3],
    pub correct_index: u8,
}

impl Question {
    /// Lane whose door carries the right answer
    pub fn correct_lane(&self) -> Lane {
        Lane::new(self.correct_index as i32)
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_lane().index()]
    }
}

/// A validated, non-empty, shared question bank
///
/// Cloning is cheap; sessions shuffle indices into it and never reorder the
/// bank itself.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        if let Some(bad) = questions.iter().find(|q| q.correct_index > 2) {
            return Err(QuizError::CorrectIndexOutOfRange {
                id: bad.id,
                index: bad.correct_index,
            });
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Load a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
