// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// One of the four answer labels of a multiple-choice question.
///
/// The store keeps these as the literal column names of the option the
/// label points at (`option_a` .. `option_d`), so the wire format matches
/// the table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerLabel {
    #[serde(rename = "option_a")]
    A,
    #[serde(rename = "option_b")]
    B,
    #[serde(rename = "option_c")]
    C,
    #[serde(rename = "option_d")]
    D,
}

impl AnswerLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLabel::A => "option_a",
            AnswerLabel::B => "option_b",
            AnswerLabel::C => "option_c",
            AnswerLabel::D => "option_d",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "option_a" => Some(AnswerLabel::A),
            "option_b" => Some(AnswerLabel::B),
            "option_c" => Some(AnswerLabel::C),
            "option_d" => Some(AnswerLabel::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw row shape of the 'quizzes' table.
///
/// `correct_option` arrives as free text from the store; it is validated
/// into an [`AnswerLabel`] when converting to [`QuizQuestion`], and
/// malformed rows are rejected at that boundary.
#[derive(Debug, Clone, FromRow)]
pub struct QuizRow {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub category: String,
    pub difficulty: String,
}

/// A validated quiz question, the unit the session sampler works with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: AnswerLabel,
    pub category: String,
    pub difficulty: String,
}

impl TryFrom<QuizRow> for QuizQuestion {
    type Error = String;

    fn try_from(row: QuizRow) -> Result<Self, Self::Error> {
        let correct_option = AnswerLabel::parse(&row.correct_option)
            .ok_or_else(|| format!("question {}: bad correct_option '{}'", row.id, row.correct_option))?;
        Ok(QuizQuestion {
            id: row.id,
            question: row.question,
            option_a: row.option_a,
            option_b: row.option_b,
            option_c: row.option_c,
            option_d: row.option_d,
            correct_option,
            category: row.category,
            difficulty: row.difficulty,
        })
    }
}

/// DTO for sending a question to the client (excludes the correct answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub category: String,
    pub difficulty: String,
}

impl From<&QuizQuestion> for PublicQuestion {
    fn from(q: &QuizQuestion) -> Self {
        PublicQuestion {
            id: q.id,
            question: q.question.clone(),
            option_a: q.option_a.clone(),
            option_b: q.option_b.clone(),
            option_c: q.option_c.clone(),
            option_d: q.option_d.clone(),
            category: q.category.clone(),
            difficulty: q.difficulty.clone(),
        }
    }
}
