use crate::models::answer::Answer;
use crate::models::result::QuizResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Persisted record of one graded quiz submission. Built from a
/// [`QuizResult`]; storage is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,
    pub quiz_id: String,
    pub course_id: String,
    pub answers: HashMap<String, Answer>,
    pub score: u32,
    pub points_earned: u32,
    pub points_possible: u32,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
}

impl QuizAttempt {
    pub fn from_result(
        course_id: impl Into<String>,
        answers: HashMap<String, Answer>,
        result: &QuizResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_id: result.quiz_id.clone(),
            course_id: course_id.into(),
            answers,
            score: result.score,
            points_earned: result.points_earned,
            points_possible: result.points_possible,
            passed: result.passed,
            completed_at: Utc::now(),
            time_spent: result.time_spent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Passed,
    Failed,
}

/// Persisted record of one coding-exercise submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSubmission {
    pub id: Uuid,
    pub exercise_id: String,
    pub course_id: String,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
    /// Rounded percentage of passing test cases, 0-100.
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
