pub mod exercise_service;
pub mod grading_service;
pub mod progress_service;
pub mod runner_service;
