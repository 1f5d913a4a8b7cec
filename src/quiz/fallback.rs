// src/quiz/fallback.rs

use crate::models::question::{AnswerLabel, QuizQuestion};

/// Bundled questions used when the question store is unreachable or has
/// fewer rows than `MIN_QUESTION_POOL`, so the quiz stays playable.
pub fn questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: 1,
            question: "Which planet is known as the Red Planet?".to_string(),
            option_a: "Venus".to_string(),
            option_b: "Mars".to_string(),
            option_c: "Jupiter".to_string(),
            option_d: "Saturn".to_string(),
            correct_option: AnswerLabel::B,
            category: "planets".to_string(),
            difficulty: "easy".to_string(),
        },
        QuizQuestion {
            id: 2,
            question: "What is the largest planet in our solar system?".to_string(),
            option_a: "Earth".to_string(),
            option_b: "Saturn".to_string(),
            option_c: "Jupiter".to_string(),
            option_d: "Neptune".to_string(),
            correct_option: AnswerLabel::C,
            category: "planets".to_string(),
            difficulty: "easy".to_string(),
        },
        QuizQuestion {
            id: 3,
            question: "Which space agency launched the Chandrayaan missions?".to_string(),
            option_a: "NASA".to_string(),
            option_b: "ESA".to_string(),
            option_c: "ISRO".to_string(),
            option_d: "SpaceX".to_string(),
            correct_option: AnswerLabel::C,
            category: "missions".to_string(),
            difficulty: "medium".to_string(),
        },
    ]
}
