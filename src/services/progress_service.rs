use crate::models::course::{lesson_id, Course};
use crate::models::progress::{
    CourseProgress, Enrollment, LessonState, ProgressionMode, QuizGateState,
};

/// Course-unlock state machine. Pure with respect to persistence: it reads
/// and mutates in-memory progression facts; writing them back (with
/// per-learner mutual exclusion) is the caller's job.
#[derive(Clone)]
pub struct ProgressService {
    final_exam_quiz_id: String,
}

impl ProgressService {
    pub fn new(final_exam_quiz_id: impl Into<String>) -> Self {
        Self {
            final_exam_quiz_id: final_exam_quiz_id.into(),
        }
    }

    /// Requires `config::init_config()` to have been called.
    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().final_exam_quiz_id.clone())
    }

    /// Lock evaluation for the lesson at `(chapter_index, lesson_index)`.
    /// The mode is always explicit; open mode bypasses all gating.
    pub fn is_lesson_locked(
        &self,
        course: &Course,
        progress: &CourseProgress,
        mode: ProgressionMode,
        chapter_index: usize,
        lesson_index: usize,
    ) -> bool {
        if mode == ProgressionMode::Open {
            return false;
        }

        // entry point of the course
        if chapter_index == 0 && lesson_index == 0 {
            return false;
        }

        let Some(chapter) = course.chapters.get(chapter_index) else {
            return true;
        };
        let Some(lesson) = chapter.lessons.get(lesson_index) else {
            return true;
        };

        // completion permanently overrides lock checks for that lesson
        if progress.completed_lessons.contains(lesson_id(lesson)) {
            return false;
        }

        if lesson_index == 0 {
            let Some(prev_chapter) = course.chapters.get(chapter_index - 1) else {
                return false;
            };
            return match &prev_chapter.quiz_id {
                Some(quiz_id) => !progress.passed_quizzes.contains(quiz_id),
                None => !prev_chapter
                    .lessons
                    .iter()
                    .all(|l| progress.completed_lessons.contains(lesson_id(l))),
            };
        }

        let prev_lesson = lesson_id(&chapter.lessons[lesson_index - 1]);
        !progress.completed_lessons.contains(prev_lesson)
    }

    pub fn lesson_state(
        &self,
        course: &Course,
        progress: &CourseProgress,
        mode: ProgressionMode,
        chapter_index: usize,
        lesson_index: usize,
    ) -> LessonState {
        let Some(lesson) = course
            .chapters
            .get(chapter_index)
            .and_then(|ch| ch.lessons.get(lesson_index))
        else {
            return LessonState::Locked;
        };

        if progress.completed_lessons.contains(lesson_id(lesson)) {
            return LessonState::Completed;
        }
        if self.is_lesson_locked(course, progress, mode, chapter_index, lesson_index) {
            LessonState::Locked
        } else {
            LessonState::Unlocked
        }
    }

    /// State of a chapter's quiz gate, or `None` when the chapter has no
    /// quiz. Availability is mode-independent: the quiz is the explicit
    /// chapter gate and opens once every lesson in the chapter is done.
    pub fn quiz_gate_state(
        &self,
        course: &Course,
        progress: &CourseProgress,
        chapter_index: usize,
    ) -> Option<QuizGateState> {
        let chapter = course.chapters.get(chapter_index)?;
        let quiz_id = chapter.quiz_id.as_ref()?;

        if progress.passed_quizzes.contains(quiz_id) {
            return Some(QuizGateState::Passed);
        }
        let all_lessons_done = chapter
            .lessons
            .iter()
            .all(|l| progress.completed_lessons.contains(lesson_id(l)));
        Some(if all_lessons_done {
            QuizGateState::Available
        } else {
            QuizGateState::Locked
        })
    }

    /// Rounded percentage of course lessons completed, counting only
    /// lessons that belong to the course.
    pub fn completion_percentage(&self, course: &Course, progress: &CourseProgress) -> u32 {
        let total = course.total_lessons();
        if total == 0 {
            return 0;
        }
        let completed = course
            .lesson_ids()
            .filter(|id| progress.completed_lessons.contains(*id))
            .count();
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }

    /// Marks one lesson completed and rolls the enrollment percentage
    /// forward. Returns the recomputed percentage.
    pub fn complete_lesson(
        &self,
        course: &Course,
        progress: &mut CourseProgress,
        enrollment: &mut Enrollment,
        lesson: &str,
    ) -> u32 {
        let id = lesson_id(lesson);
        if progress.completed_lessons.insert(id.to_string()) {
            tracing::debug!(course_id = %course.id, lesson_id = %id, "lesson completed");
        }
        let percentage = self.completion_percentage(course, progress);
        enrollment.record_progress(percentage);
        percentage
    }

    /// A passed exercise completes its lesson.
    pub fn record_exercise_pass(
        &self,
        course: &Course,
        progress: &mut CourseProgress,
        enrollment: &mut Enrollment,
        exercise_id: &str,
        lesson: &str,
    ) -> u32 {
        progress.completed_exercises.insert(exercise_id.to_string());
        self.complete_lesson(course, progress, enrollment, lesson)
    }

    /// Records a quiz pass and bulk-completes the lessons it gates: the
    /// final exam completes every lesson in the course in one batch; an
    /// ordinary chapter quiz completes that chapter's lessons. Returns the
    /// lesson ids newly marked completed.
    pub fn record_quiz_pass(
        &self,
        course: &Course,
        progress: &mut CourseProgress,
        enrollment: &mut Enrollment,
        quiz_id: &str,
    ) -> Vec<String> {
        progress.passed_quizzes.insert(quiz_id.to_string());

        let gated_lessons: Vec<&String> = if quiz_id == self.final_exam_quiz_id {
            course
                .chapters
                .iter()
                .flat_map(|ch| ch.lessons.iter())
                .collect()
        } else if let Some((_, chapter)) = course.chapter_for_quiz(quiz_id) {
            chapter.lessons.iter().collect()
        } else {
            Vec::new()
        };

        let mut newly_completed = Vec::new();
        for lesson in gated_lessons {
            let id = lesson_id(lesson).to_string();
            if progress.completed_lessons.insert(id.clone()) {
                newly_completed.push(id);
            }
        }

        if !newly_completed.is_empty() {
            tracing::info!(
                course_id = %course.id,
                quiz_id,
                lessons = newly_completed.len(),
                "quiz pass auto-completed lessons"
            );
        }

        let percentage = self.completion_percentage(course, progress);
        enrollment.record_progress(percentage);
        newly_completed
    }
}
