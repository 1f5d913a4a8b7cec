// src/models/quiz_result.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'quiz_results' table in the database.
/// One row per completed quiz session; never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Aggregated quiz statistics for a user, derived at read time.
#[derive(Debug, Serialize)]
pub struct QuizStats {
    pub total_quizzes: i64,
    /// Mean of per-session score fractions, as a rounded percentage.
    pub average_percent: i64,
    pub best_score: i64,
}

impl QuizStats {
    pub fn from_results(results: &[QuizResult]) -> Self {
        let total_quizzes = results.len() as i64;
        if total_quizzes == 0 {
            return QuizStats {
                total_quizzes: 0,
                average_percent: 0,
                best_score: 0,
            };
        }

        let fraction_sum: f64 = results
            .iter()
            .filter(|r| r.total_questions > 0)
            .map(|r| r.score as f64 / r.total_questions as f64)
            .sum();
        let average_percent = (fraction_sum / total_quizzes as f64 * 100.0).round() as i64;
        let best_score = results.iter().map(|r| r.score).max().unwrap_or(0);

        QuizStats {
            total_quizzes,
            average_percent,
            best_score,
        }
    }
}
