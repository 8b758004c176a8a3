use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Progression policy. Structured mode gates content sequentially; open
/// mode makes every lesson reachable. Always passed explicitly into lock
/// evaluation; never held as ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionMode {
    #[default]
    Structured,
    Open,
}

impl FromStr for ProgressionMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "structured" => Ok(ProgressionMode::Structured),
            "open" => Ok(ProgressionMode::Open),
            other => Err(format!("unknown progression mode '{}'", other)),
        }
    }
}

impl fmt::Display for ProgressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressionMode::Structured => write!(f, "structured"),
            ProgressionMode::Open => write!(f, "open"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonState {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizGateState {
    Locked,
    Available,
    Passed,
}

/// Persisted completion facts for one learner in one course. Append-only
/// from this crate's perspective; clearing progress is an external
/// administrative operation. Ordered sets keep serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    #[serde(default)]
    pub completed_lessons: BTreeSet<String>,
    #[serde(default)]
    pub completed_exercises: BTreeSet<String>,
    #[serde(default)]
    pub passed_quizzes: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    InProgress,
    Completed,
}

/// Enrollment record carrying the course completion percentage. Persisted
/// by the caller after every progression update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub completion_percentage: u32,
    pub enrolled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(course_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            course_id: course_id.into(),
            status: EnrollmentStatus::InProgress,
            completion_percentage: 0,
            enrolled_at: now,
            completed_at: None,
            updated_at: now,
        }
    }

    /// Records a freshly computed completion percentage. The percentage is
    /// monotonic and the COMPLETED transition at 100% is one-way.
    pub fn record_progress(&mut self, percentage: u32) {
        let now = Utc::now();
        self.completion_percentage = self.completion_percentage.max(percentage);
        self.updated_at = now;

        if self.completion_percentage >= 100 && self.status != EnrollmentStatus::Completed {
            self.status = EnrollmentStatus::Completed;
            self.completed_at = Some(now);
            tracing::info!(course_id = %self.course_id, "course enrollment completed");
        }
    }
}
