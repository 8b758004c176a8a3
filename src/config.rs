use crate::error::{Error, Result};
use crate::models::progress::ProgressionMode;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    /// Default progression mode for callers that do not carry a learner
    /// preference. Lock evaluation always takes the mode as an explicit
    /// parameter; this is only the fallback.
    pub default_mode: ProgressionMode,
    /// Quiz id whose pass bulk-completes every lesson in the course.
    pub final_exam_quiz_id: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let default_mode = match env::var("LEARNING_MODE") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for LEARNING_MODE: {}", e)))?,
            Err(_) => ProgressionMode::Structured,
        };

        Ok(Self {
            default_mode,
            final_exam_quiz_id: env::var("FINAL_EXAM_QUIZ_ID")
                .unwrap_or_else(|_| "final-exam".to_string()),
        })
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults() {
        env::remove_var("LEARNING_MODE");
        env::remove_var("FINAL_EXAM_QUIZ_ID");
        let config = Config::from_env().expect("config");
        assert_eq!(config.default_mode, ProgressionMode::Structured);
        assert_eq!(config.final_exam_quiz_id, "final-exam");
    }
}
