//! Per-session question order
//!
//! Each session draws a fresh permutation of the bank. The bank is shared and
//! never reordered; only an index list is shuffled.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::{Question, QuestionSet};
use crate::error::{QuizError, Result};

/// Result of asking for the next gate's question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw<'a> {
    Next(&'a Question),
    /// Every question has been drawn; the run is won
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    questions: QuestionSet,
    order: Vec<usize>,
    cursor: usize,
}

impl Sequencer {
    /// Uniformly shuffled order (Fisher-Yates via `SliceRandom::shuffle`)
    pub fn shuffled<R: Rng + ?Sized>(questions: QuestionSet, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..questions.len()).collect();
        order.shuffle(rng);
        Self {
            questions,
            order,
            cursor: 0,
        }
    }

    /// Fixed order, for scripted runs; `order` must be a permutation of the bank
    pub fn with_order(questions: QuestionSet, order: Vec<usize>) -> Result<Self> {
        let len = questions.len();
        let mut seen = vec![false; len];
        if order.len() != len {
            return Err(QuizError::InvalidOrder { len });
        }
        for &i in &order {
            if i >= len || seen[i] {
                return Err(QuizError::InvalidOrder { len });
            }
            seen[i] = true;
        }
        Ok(Self {
            questions,
            order,
            cursor: 0,
        })
    }

    /// Bank order, no shuffling
    pub fn in_order(questions: QuestionSet) -> Self {
        let order = (0..questions.len()).collect();
        Self {
            questions,
            order,
            cursor: 0,
        }
    }

    pub fn next(&mut self) -> Draw<'_> {
        let Some(&index) = self.order.get(self.cursor) else {
            return Draw::Exhausted;
        };
        self.cursor += 1;
        match self.questions.get(index) {
            Some(question) => Draw::Next(question),
            None => Draw::Exhausted,
        }
    }

    /// Questions not yet drawn
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
