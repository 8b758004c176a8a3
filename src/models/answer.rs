use serde::{Deserialize, Serialize};

/// A learner's answer to a single question, tagged with the question variant
/// it was submitted for. The tag is echoed by the client; the graders treat
/// a mismatch between answer tag and question variant as incorrect rather
/// than as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    MultipleChoice {
        /// Selected option id.
        answer: String,
    },
    MultipleSelect {
        /// Selected option ids, order-insensitive.
        answers: Vec<String>,
    },
    TrueFalse {
        answer: bool,
    },
    CodeCompletion {
        code: String,
    },
    CodingExercise {
        code: String,
    },
    MultiPart {
        /// Sub-answers, positionally aligned with the question's parts.
        answers: Vec<Answer>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_multi_part_answers() {
        let raw = serde_json::json!({
            "type": "multi-part",
            "answers": [
                { "type": "true-false", "answer": true },
                { "type": "code-completion", "code": "rex = Dog()" }
            ]
        });

        let answer: Answer = serde_json::from_value(raw).expect("answer");
        match answer {
            Answer::MultiPart { ref answers } => assert_eq!(answers.len(), 2),
            ref other => panic!("unexpected variant: {:?}", other),
        }
    }
}
