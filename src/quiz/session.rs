// src/quiz/session.rs

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::config::QUESTION_TIME_LIMIT_SECS;
use crate::models::question::{AnswerLabel, QuizQuestion};

/// Errors raised by the quiz session state machine.
#[derive(Debug, PartialEq, Eq)]
pub enum QuizError {
    /// No questions available from any source; the quiz cannot start.
    EmptyPool,
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::EmptyPool => write!(f, "no quiz questions available"),
        }
    }
}

impl std::error::Error for QuizError {}

/// One quiz attempt: a sampled question pool, the user's answers so far,
/// and the per-question countdown.
///
/// The session is a value owned by whoever created it; all transitions
/// run to completion synchronously. Once `completed` the answers are
/// frozen and the score has been computed exactly once.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    pool: Vec<QuizQuestion>,
    current_index: usize,
    answers: Vec<Option<AnswerLabel>>,
    seconds_remaining: u32,
    completed: bool,
    score: Option<usize>,
}

impl QuizSession {
    /// Starts a session by drawing `size` questions without replacement.
    ///
    /// The draw is a uniform random permutation of `pool` truncated to
    /// `size`. A pool smaller than `size` is used whole (truncate, never
    /// pad). An empty pool is an error.
    pub fn start<R: Rng>(
        mut pool: Vec<QuizQuestion>,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        pool.shuffle(rng);
        pool.truncate(size);

        let answers = vec![None; pool.len()];
        Ok(QuizSession {
            id: Uuid::new_v4(),
            pool,
            current_index: 0,
            answers,
            seconds_remaining: QUESTION_TIME_LIMIT_SECS,
            completed: false,
            score: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pool(&self) -> &[QuizQuestion] {
        &self.pool
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.pool[self.current_index]
    }

    pub fn answers(&self) -> &[Option<AnswerLabel>] {
        &self.answers
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Final score. `None` until the session completes.
    pub fn score(&self) -> Option<usize> {
        self.score
    }

    /// Records `label` for the current question. Ignored once completed;
    /// answers may be revised until then (the UI allows going back).
    pub fn select_answer(&mut self, label: AnswerLabel) {
        if self.completed {
            return;
        }
        self.answers[self.current_index] = Some(label);
    }

    /// Moves to the next question, or completes the session when the
    /// current question is the last one. Idempotent after completion.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        if self.current_index + 1 >= self.pool.len() {
            self.complete();
        } else {
            self.current_index += 1;
            self.seconds_remaining = QUESTION_TIME_LIMIT_SECS;
        }
    }

    /// Steps back one question so an earlier answer can be revised.
    pub fn previous(&mut self) {
        if self.completed || self.current_index == 0 {
            return;
        }
        self.current_index -= 1;
        self.seconds_remaining = QUESTION_TIME_LIMIT_SECS;
    }

    /// One second of countdown. Hitting zero behaves as `advance` with
    /// whatever answer is currently recorded; an unanswered question
    /// simply counts as incorrect. No-op once completed, so a stale
    /// timer firing after the session ended cannot double-advance.
    pub fn tick(&mut self) {
        if self.completed {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.advance();
        }
    }

    fn complete(&mut self) {
        self.completed = true;
        if self.score.is_none() {
            let score = self
                .answers
                .iter()
                .zip(&self.pool)
                .filter(|(answer, q)| **answer == Some(q.correct_option))
                .count();
            self.score = Some(score);
        }
    }
}
