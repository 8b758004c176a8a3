use crate::models::answer::Answer;
use serde::{Deserialize, Serialize};

/// Outcome of a single test case, produced by a [`TestCaseRunner`]
/// implementation.
///
/// [`TestCaseRunner`]: crate::services::runner_service::TestCaseRunner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_case_id: String,
    pub passed: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
    pub points_earned: u32,
    pub points_possible: u32,
    /// Echo of the submitted answer; `None` when the question was left
    /// unanswered.
    pub user_answer: Option<Answer>,
    /// Disclosure of the correct answer for the review UI, where the
    /// variant supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Per-test-case outcomes, coding exercises only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Vec<TestResult>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub quiz_id: String,
    pub passed: bool,
    /// Rounded integer percentage, 0-100.
    pub score: u32,
    pub points_earned: u32,
    pub points_possible: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u32>,
    /// One entry per quiz question, in quiz order.
    pub question_results: Vec<QuestionResult>,
    /// Echoed from the quiz for auditability.
    pub passing_score: u32,
}
