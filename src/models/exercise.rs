use crate::models::question::TestCase;
use serde::{Deserialize, Serialize};

/// A standalone coding exercise attached to a lesson. Passing all of its
/// test cases completes the lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub language: String,
    pub starter_code: String,
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub hints: Vec<String>,
    /// Reference solution, never disclosed to the learner by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}
