pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::exercise_service::ExerciseService;
use crate::services::grading_service::GradingService;
use crate::services::progress_service::ProgressService;
use crate::services::runner_service::{HeuristicRunner, TestCaseRunner};
use std::sync::Arc;

/// Bundle of the engine's services, sharing one test-case runner.
#[derive(Clone)]
pub struct Engine {
    pub grading_service: GradingService,
    pub exercise_service: ExerciseService,
    pub progress_service: ProgressService,
}

impl Engine {
    /// Builds the engine with the built-in heuristic runner. Requires
    /// `config::init_config()` to have been called.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(HeuristicRunner))
    }

    /// Builds the engine around a caller-provided runner, e.g. a real
    /// sandboxed interpreter.
    pub fn with_runner(runner: Arc<dyn TestCaseRunner>) -> Self {
        let config = crate::config::get_config();

        Self {
            grading_service: GradingService::new(runner.clone()),
            exercise_service: ExerciseService::new(runner),
            progress_service: ProgressService::new(config.final_exam_quiz_id.clone()),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
