use crate::models::answer::Answer;
use crate::models::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// A quiz definition, authored externally and loaded read-only per grading
/// request. The grading engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub chapter_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Percentage (0-100) required to pass; the threshold is inclusive.
    #[validate(range(min = 0, max = 100))]
    pub passing_score: u32,
    /// Seconds, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub quiz_id: String,
    /// questionId -> answer; questions absent from the map are unanswered
    /// and score zero without being an error.
    #[serde(default)]
    pub answers: HashMap<String, Answer>,
    /// Seconds, echoed into the result untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
}
