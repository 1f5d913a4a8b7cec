// src/quiz/mod.rs
//
// The question-bank sampler and quiz session state machine. Pure logic,
// no I/O: handlers own the store round-trips and feed questions in.

pub mod fallback;
pub mod session;

pub use session::{QuizError, QuizSession};
