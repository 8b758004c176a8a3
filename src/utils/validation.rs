use crate::models::question::{
    LeafDetails, LeafQuestion, MultipleChoiceDetails, MultipleSelectDetails, QuestionDetails,
    QuizOption,
};
use crate::models::quiz::Quiz;
use std::collections::HashSet;
use validator::{Validate, ValidationError, ValidationErrors};

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

/// Structural validation of a quiz definition, for content loaders to run
/// at load time. The grading path itself never validates; malformed
/// submissions degrade to zero credit instead.
pub fn validate_quiz(quiz: &Quiz) -> crate::error::Result<()> {
    let mut errors = match quiz.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(e) => e,
    };

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(&question.id) {
            add_question_error(
                &mut errors,
                "duplicate_question_id",
                format!("duplicate question id '{}'", question.id),
            );
        }
        if question.points == 0 {
            add_question_error(
                &mut errors,
                "zero_points",
                format!("question '{}' must be worth at least 1 point", question.id),
            );
        }

        match &question.details {
            QuestionDetails::MultipleChoice(mc) => {
                check_multiple_choice(&mut errors, &question.id, mc)
            }
            QuestionDetails::MultipleSelect(ms) => {
                check_multiple_select(&mut errors, &question.id, ms)
            }
            QuestionDetails::CodeCompletion(cc) => {
                if cc.correct_answer.trim().is_empty() {
                    add_question_error(
                        &mut errors,
                        "empty_correct_answer",
                        format!("question '{}' has an empty canonical answer", question.id),
                    );
                }
            }
            QuestionDetails::MultiPart(mp) => {
                if mp.parts.is_empty() {
                    add_question_error(
                        &mut errors,
                        "empty_parts",
                        format!("multi-part question '{}' has no parts", question.id),
                    );
                }
                let part_total: u32 = mp.parts.iter().map(|p| p.points).sum();
                if !mp.parts.is_empty() && part_total != question.points {
                    add_question_error(
                        &mut errors,
                        "part_points_mismatch",
                        format!(
                            "multi-part question '{}' is worth {} points but its parts sum to {}",
                            question.id, question.points, part_total
                        ),
                    );
                }
                for part in &mp.parts {
                    check_part(&mut errors, part);
                }
            }
            QuestionDetails::TrueFalse(_) | QuestionDetails::CodingExercise(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

fn check_part(errors: &mut ValidationErrors, part: &LeafQuestion) {
    if part.points == 0 {
        add_question_error(
            errors,
            "zero_points",
            format!("part '{}' must be worth at least 1 point", part.id),
        );
    }
    match &part.details {
        LeafDetails::MultipleChoice(mc) => check_multiple_choice(errors, &part.id, mc),
        LeafDetails::MultipleSelect(ms) => check_multiple_select(errors, &part.id, ms),
        LeafDetails::CodeCompletion(cc) => {
            if cc.correct_answer.trim().is_empty() {
                add_question_error(
                    errors,
                    "empty_correct_answer",
                    format!("part '{}' has an empty canonical answer", part.id),
                );
            }
        }
        LeafDetails::TrueFalse(_) | LeafDetails::CodingExercise(_) => {}
    }
}

fn check_multiple_choice(
    errors: &mut ValidationErrors,
    question_id: &str,
    details: &MultipleChoiceDetails,
) {
    if !has_option(&details.options, &details.correct_answer) {
        add_question_error(
            errors,
            "unknown_correct_option",
            format!(
                "question '{}' marks unknown option '{}' as correct",
                question_id, details.correct_answer
            ),
        );
    }
}

fn check_multiple_select(
    errors: &mut ValidationErrors,
    question_id: &str,
    details: &MultipleSelectDetails,
) {
    if details.correct_answers.is_empty() {
        add_question_error(
            errors,
            "empty_correct_set",
            format!("question '{}' has no correct options", question_id),
        );
    }
    for id in &details.correct_answers {
        if !has_option(&details.options, id) {
            add_question_error(
                errors,
                "unknown_correct_option",
                format!(
                    "question '{}' marks unknown option '{}' as correct",
                    question_id, id
                ),
            );
        }
    }
}

fn has_option(options: &[QuizOption], id: &str) -> bool {
    options.iter().any(|opt| opt.id == id)
}

fn add_question_error(errors: &mut ValidationErrors, code: &'static str, message: String) {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    errors.add("questions", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, TrueFalseDetails};

    fn option(id: &str) -> QuizOption {
        QuizOption {
            id: id.into(),
            text: format!("Option {}", id),
        }
    }

    fn quiz_with(questions: Vec<Question>) -> Quiz {
        Quiz {
            id: "quiz-01".into(),
            course_id: "python-oop".into(),
            chapter_id: "ch1".into(),
            title: "Chapter 1 Quiz".into(),
            description: String::new(),
            passing_score: 70,
            time_limit: None,
            questions,
        }
    }

    fn true_false(id: &str, points: u32) -> Question {
        Question {
            id: id.into(),
            prompt: "?".into(),
            points,
            explanation: None,
            details: QuestionDetails::TrueFalse(TrueFalseDetails {
                correct_answer: true,
            }),
        }
    }

    #[test]
    fn accepts_well_formed_quiz() {
        let quiz = quiz_with(vec![true_false("q1", 1), true_false("q2", 2)]);
        assert!(validate_quiz(&quiz).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids_and_zero_points() {
        let quiz = quiz_with(vec![true_false("q1", 1), true_false("q1", 0)]);
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn rejects_dangling_correct_option() {
        let quiz = quiz_with(vec![Question {
            id: "q1".into(),
            prompt: "?".into(),
            points: 1,
            explanation: None,
            details: QuestionDetails::MultipleChoice(MultipleChoiceDetails {
                options: vec![option("a"), option("b")],
                correct_answer: "z".into(),
            }),
        }]);
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn rejects_empty_multiple_select_correct_set() {
        let quiz = quiz_with(vec![Question {
            id: "q1".into(),
            prompt: "?".into(),
            points: 1,
            explanation: None,
            details: QuestionDetails::MultipleSelect(MultipleSelectDetails {
                options: vec![option("a"), option("b")],
                correct_answers: vec![],
            }),
        }]);
        assert!(validate_quiz(&quiz).is_err());
    }

    #[test]
    fn rejects_part_points_that_disagree_with_the_question_total() {
        use crate::models::question::{LeafDetails, LeafQuestion, MultiPartDetails};

        let part = |id: &str| LeafQuestion {
            id: id.into(),
            prompt: "?".into(),
            points: 10,
            explanation: None,
            details: LeafDetails::TrueFalse(TrueFalseDetails {
                correct_answer: true,
            }),
        };
        let question = |points| Question {
            id: "q1".into(),
            prompt: "?".into(),
            points,
            explanation: None,
            details: QuestionDetails::MultiPart(MultiPartDetails {
                parts: vec![part("q1a"), part("q1b")],
            }),
        };

        // parts sum to 20
        assert!(validate_quiz(&quiz_with(vec![question(15)])).is_err());
        assert!(validate_quiz(&quiz_with(vec![question(20)])).is_ok());
    }

    #[test]
    fn rejects_out_of_range_passing_score() {
        let mut quiz = quiz_with(vec![true_false("q1", 1)]);
        quiz.passing_score = 120;
        assert!(validate_quiz(&quiz).is_err());
    }
}
