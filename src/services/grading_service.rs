use crate::models::answer::Answer;
use crate::models::question::{
    CodeCompletionDetails, CodingExerciseDetails, LeafDetails, LeafQuestion,
    MultiPartDetails, MultipleChoiceDetails, MultipleSelectDetails, Question, QuestionDetails,
    TrueFalseDetails,
};
use crate::models::quiz::{Quiz, QuizSubmission};
use crate::models::result::{QuestionResult, QuizResult, TestResult};
use crate::services::runner_service::TestCaseRunner;
use crate::utils::normalize::normalize_code;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Stateless quiz grader. Holds only the test-case runner used for
/// coding-exercise questions; identical inputs always produce identical
/// results (provided the runner is itself deterministic).
#[derive(Clone)]
pub struct GradingService {
    runner: Arc<dyn TestCaseRunner>,
}

/// Per-question grading outcome before it is joined with the common
/// question fields.
struct Graded {
    correct: bool,
    points_earned: u32,
    correct_answer: Option<serde_json::Value>,
    test_results: Option<Vec<TestResult>>,
}

impl Graded {
    /// Zero credit for an answer whose tag does not match the question
    /// variant. A malformed client submission must never be an error.
    fn mismatch() -> Self {
        Self {
            correct: false,
            points_earned: 0,
            correct_answer: None,
            test_results: None,
        }
    }
}

impl GradingService {
    pub fn new(runner: Arc<dyn TestCaseRunner>) -> Self {
        Self { runner }
    }

    pub fn grade_quiz(&self, quiz: &Quiz, submission: &QuizSubmission) -> QuizResult {
        for question_id in submission.answers.keys() {
            if quiz.question(question_id).is_none() {
                tracing::warn!(
                    quiz_id = %quiz.id,
                    %question_id,
                    "ignoring answer for unknown question"
                );
            }
        }

        let mut question_results = Vec::with_capacity(quiz.questions.len());
        let mut points_earned: u32 = 0;
        let mut points_possible: u32 = 0;

        for question in &quiz.questions {
            points_possible += question.points;

            let result = match submission.answers.get(&question.id) {
                None => QuestionResult {
                    question_id: question.id.clone(),
                    correct: false,
                    points_earned: 0,
                    points_possible: question.points,
                    user_answer: None,
                    correct_answer: None,
                    explanation: question.explanation.clone(),
                    test_results: None,
                },
                Some(answer) => {
                    let graded = self.grade_question(question, answer);
                    QuestionResult {
                        question_id: question.id.clone(),
                        correct: graded.correct,
                        points_earned: graded.points_earned,
                        points_possible: question.points,
                        user_answer: Some(answer.clone()),
                        correct_answer: graded.correct_answer,
                        explanation: question.explanation.clone(),
                        test_results: graded.test_results,
                    }
                }
            };

            points_earned += result.points_earned;
            question_results.push(result);
        }

        let score = if points_possible > 0 {
            ((points_earned as f64 / points_possible as f64) * 100.0).round() as u32
        } else {
            0
        };
        let passed = score >= quiz.passing_score;

        tracing::info!(
            quiz_id = %quiz.id,
            score,
            passed,
            points_earned,
            points_possible,
            "quiz graded"
        );

        QuizResult {
            quiz_id: quiz.id.clone(),
            passed,
            score,
            points_earned,
            points_possible,
            time_spent: submission.time_spent,
            question_results,
            passing_score: quiz.passing_score,
        }
    }

    fn grade_question(&self, question: &Question, answer: &Answer) -> Graded {
        match &question.details {
            QuestionDetails::MultipleChoice(d) => grade_multiple_choice(question.points, d, answer),
            QuestionDetails::MultipleSelect(d) => grade_multiple_select(question.points, d, answer),
            QuestionDetails::TrueFalse(d) => grade_true_false(question.points, d, answer),
            QuestionDetails::CodeCompletion(d) => grade_code_completion(question.points, d, answer),
            QuestionDetails::CodingExercise(d) => {
                self.grade_coding_exercise(question.points, d, answer)
            }
            QuestionDetails::MultiPart(d) => self.grade_multi_part(question.points, d, answer),
        }
    }

    fn grade_leaf(&self, part: &LeafQuestion, answer: &Answer) -> Graded {
        match &part.details {
            LeafDetails::MultipleChoice(d) => grade_multiple_choice(part.points, d, answer),
            LeafDetails::MultipleSelect(d) => grade_multiple_select(part.points, d, answer),
            LeafDetails::TrueFalse(d) => grade_true_false(part.points, d, answer),
            LeafDetails::CodeCompletion(d) => grade_code_completion(part.points, d, answer),
            LeafDetails::CodingExercise(d) => self.grade_coding_exercise(part.points, d, answer),
        }
    }

    /// Partial credit, proportional to passing test cases and floored.
    /// Every other grader is all-or-nothing; the asymmetry is intentional.
    fn grade_coding_exercise(
        &self,
        points: u32,
        details: &CodingExerciseDetails,
        answer: &Answer,
    ) -> Graded {
        let Answer::CodingExercise { code } = answer else {
            return Graded::mismatch();
        };

        let mut results = Vec::with_capacity(details.test_cases.len());
        let mut passed_count: u32 = 0;
        for case in &details.test_cases {
            let result = self.runner.run(code, &details.language, case);
            if result.passed {
                passed_count += 1;
            }
            results.push(result);
        }

        let total = details.test_cases.len() as u32;
        let (correct, points_earned) = if total == 0 {
            (false, 0)
        } else {
            (passed_count == total, points * passed_count / total)
        };

        Graded {
            correct,
            points_earned,
            correct_answer: None,
            test_results: Some(results),
        }
    }

    /// Points accrue per part independently of overall correctness: a
    /// missing or wrong part makes the whole question incorrect while the
    /// other parts keep their earned points.
    fn grade_multi_part(&self, points: u32, details: &MultiPartDetails, answer: &Answer) -> Graded {
        let Answer::MultiPart { answers } = answer else {
            return Graded::mismatch();
        };

        let mut earned: u32 = 0;
        let mut all_correct = true;

        for (idx, part) in details.parts.iter().enumerate() {
            match answers.get(idx) {
                None => all_correct = false,
                Some(sub_answer) => {
                    let graded = self.grade_leaf(part, sub_answer);
                    earned += graded.points_earned;
                    if !graded.correct {
                        all_correct = false;
                    }
                }
            }
        }

        Graded {
            correct: all_correct,
            // clamp against part points that disagree with the question total
            points_earned: earned.min(points),
            correct_answer: None,
            test_results: None,
        }
    }
}

fn grade_multiple_choice(points: u32, details: &MultipleChoiceDetails, answer: &Answer) -> Graded {
    let Answer::MultipleChoice { answer: selected } = answer else {
        return Graded::mismatch();
    };

    let correct = *selected == details.correct_answer;
    Graded {
        correct,
        points_earned: if correct { points } else { 0 },
        correct_answer: Some(json!(details.correct_answer)),
        test_results: None,
    }
}

/// Strict set equality: any missing or extra selection scores zero.
fn grade_multiple_select(points: u32, details: &MultipleSelectDetails, answer: &Answer) -> Graded {
    let Answer::MultipleSelect { answers } = answer else {
        return Graded::mismatch();
    };

    let selected: BTreeSet<&str> = answers.iter().map(String::as_str).collect();
    let expected: BTreeSet<&str> = details.correct_answers.iter().map(String::as_str).collect();
    let correct = selected == expected;

    Graded {
        correct,
        points_earned: if correct { points } else { 0 },
        correct_answer: Some(json!(details.correct_answers)),
        test_results: None,
    }
}

fn grade_true_false(points: u32, details: &TrueFalseDetails, answer: &Answer) -> Graded {
    let Answer::TrueFalse { answer: value } = answer else {
        return Graded::mismatch();
    };

    let correct = *value == details.correct_answer;
    Graded {
        correct,
        points_earned: if correct { points } else { 0 },
        correct_answer: Some(json!(details.correct_answer)),
        test_results: None,
    }
}

fn grade_code_completion(points: u32, details: &CodeCompletionDetails, answer: &Answer) -> Graded {
    let Answer::CodeCompletion { code } = answer else {
        return Graded::mismatch();
    };

    let submitted = normalize_code(code);
    let correct = std::iter::once(&details.correct_answer)
        .chain(details.acceptable_answers.iter())
        .any(|candidate| normalize_code(candidate) == submitted);

    Graded {
        correct,
        points_earned: if correct { points } else { 0 },
        correct_answer: Some(json!(details.correct_answer)),
        test_results: None,
    }
}
