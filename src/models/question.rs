use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default)]
    pub is_hidden: bool,
}

/// A top-level quiz question. The variant payload is carried inline in the
/// JSON object, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub details: QuestionDetails,
}

/// A sub-question inside a multi-part question. Structurally identical to
/// [`Question`] except that its details are [`LeafDetails`], so a multi-part
/// part can never itself be multi-part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafQuestion {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub details: LeafDetails,
}

fn default_points() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionDetails {
    MultipleChoice(MultipleChoiceDetails),
    MultipleSelect(MultipleSelectDetails),
    TrueFalse(TrueFalseDetails),
    CodeCompletion(CodeCompletionDetails),
    CodingExercise(CodingExerciseDetails),
    MultiPart(MultiPartDetails),
}

/// Every variant except `multi-part`. Used for the parts of a multi-part
/// question, which keeps the nesting depth at exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LeafDetails {
    MultipleChoice(MultipleChoiceDetails),
    MultipleSelect(MultipleSelectDetails),
    TrueFalse(TrueFalseDetails),
    CodeCompletion(CodeCompletionDetails),
    CodingExercise(CodingExerciseDetails),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceDetails {
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleSelectDetails {
    pub options: Vec<QuizOption>,
    pub correct_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseDetails {
    pub correct_answer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCompletionDetails {
    pub starter_code: String,
    pub correct_answer: String,
    #[serde(default)]
    pub acceptable_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingExerciseDetails {
    pub description: String,
    pub starter_code: String,
    pub language: String,
    pub test_cases: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPartDetails {
    pub parts: Vec<LeafQuestion>,
}
