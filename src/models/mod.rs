pub mod answer;
pub mod attempt;
pub mod course;
pub mod exercise;
pub mod progress;
pub mod question;
pub mod quiz;
pub mod result;
