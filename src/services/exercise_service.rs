use crate::models::attempt::{ExerciseSubmission, SubmissionStatus};
use crate::models::exercise::Exercise;
use crate::models::result::TestResult;
use crate::services::runner_service::TestCaseRunner;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Grades standalone coding exercises. A fully passing submission is what
/// completes the exercise's lesson (see
/// [`ProgressService::record_exercise_pass`]).
///
/// [`ProgressService::record_exercise_pass`]:
/// crate::services::progress_service::ProgressService::record_exercise_pass
#[derive(Clone)]
pub struct ExerciseService {
    runner: Arc<dyn TestCaseRunner>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseReport {
    pub success: bool,
    /// Rounded percentage of passing test cases, 0-100.
    pub score: u32,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub results: Vec<TestResult>,
    pub message: String,
}

impl ExerciseService {
    pub fn new(runner: Arc<dyn TestCaseRunner>) -> Self {
        Self { runner }
    }

    pub fn grade_submission(&self, exercise: &Exercise, code: &str) -> ExerciseReport {
        let mut results = Vec::with_capacity(exercise.test_cases.len());
        let mut passed_tests = 0usize;

        for case in &exercise.test_cases {
            let result = self.runner.run(code, &exercise.language, case);
            if result.passed {
                passed_tests += 1;
            }
            results.push(result);
        }

        let total_tests = exercise.test_cases.len();
        let success = total_tests > 0 && passed_tests == total_tests;
        let score = if total_tests > 0 {
            ((passed_tests as f64 / total_tests as f64) * 100.0).round() as u32
        } else {
            0
        };

        let message = if success {
            format!("Perfect! You passed all {} tests!", total_tests)
        } else {
            format!(
                "You passed {} out of {} tests. Keep trying!",
                passed_tests, total_tests
            )
        };

        tracing::info!(
            exercise_id = %exercise.id,
            score,
            passed_tests,
            total_tests,
            "exercise graded"
        );

        ExerciseReport {
            success,
            score,
            total_tests,
            passed_tests,
            results,
            message,
        }
    }

    pub fn build_record(
        &self,
        exercise: &Exercise,
        course_id: &str,
        code: &str,
        report: &ExerciseReport,
    ) -> ExerciseSubmission {
        let now = Utc::now();
        ExerciseSubmission {
            id: Uuid::new_v4(),
            exercise_id: exercise.id.clone(),
            course_id: course_id.to_string(),
            code: code.to_string(),
            language: exercise.language.clone(),
            status: if report.success {
                SubmissionStatus::Passed
            } else {
                SubmissionStatus::Failed
            },
            score: report.score,
            feedback: Some(report.message.clone()),
            submitted_at: now,
            completed_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::TestCase;
    use crate::services::runner_service::HeuristicRunner;

    fn exercise(test_cases: Vec<TestCase>) -> Exercise {
        Exercise {
            id: "ex-01".into(),
            title: "Variables".into(),
            description: "Assign x".into(),
            language: "python".into(),
            starter_code: "x = ____".into(),
            test_cases,
            hints: vec![],
            solution: None,
        }
    }

    fn validation_case(id: &str, validation: &str) -> TestCase {
        TestCase {
            id: id.into(),
            description: format!("checks {}", validation),
            input: None,
            expected_output: None,
            validation: Some(validation.into()),
            is_hidden: false,
        }
    }

    #[test]
    fn all_tests_passing_is_a_success() {
        let service = ExerciseService::new(Arc::new(HeuristicRunner));
        let ex = exercise(vec![
            validation_case("t1", "x == 1"),
            validation_case("t2", "y == 2"),
        ]);

        let report = service.grade_submission(&ex, "x = 1\ny = 2\n");
        assert!(report.success);
        assert_eq!(report.score, 100);
        assert_eq!(report.passed_tests, 2);

        let record = service.build_record(&ex, "python-oop", "x = 1\ny = 2\n", &report);
        assert_eq!(record.status, SubmissionStatus::Passed);
        assert_eq!(record.score, 100);
    }

    #[test]
    fn partial_pass_is_a_failure_with_rounded_score() {
        let service = ExerciseService::new(Arc::new(HeuristicRunner));
        let ex = exercise(vec![
            validation_case("t1", "x == 1"),
            validation_case("t2", "y == 2"),
            validation_case("t3", "z == 3"),
        ]);

        let report = service.grade_submission(&ex, "x = 1\n");
        assert!(!report.success);
        assert_eq!(report.passed_tests, 1);
        assert_eq!(report.score, 33);

        let record = service.build_record(&ex, "python-oop", "x = 1\n", &report);
        assert_eq!(record.status, SubmissionStatus::Failed);
    }

    #[test]
    fn exercise_without_tests_never_succeeds() {
        let service = ExerciseService::new(Arc::new(HeuristicRunner));
        let report = service.grade_submission(&exercise(vec![]), "x = 1");
        assert!(!report.success);
        assert_eq!(report.score, 0);
    }
}
