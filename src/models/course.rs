use serde::{Deserialize, Serialize};

/// Course structure as authored in `course.json`. Read-only to this crate;
/// chapter order defines unlock order, lesson order defines unlock order
/// within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    /// Lesson entries as stored on disk, possibly with a `.md` suffix.
    pub lessons: Vec<String>,
    /// Quiz gating this chapter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
}

impl Course {
    pub fn total_lessons(&self) -> usize {
        self.chapters.iter().map(|ch| ch.lessons.len()).sum()
    }

    /// Normalized ids of every lesson in the course, in course order.
    pub fn lesson_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters
            .iter()
            .flat_map(|ch| ch.lessons.iter().map(|l| lesson_id(l)))
    }

    /// The chapter owning the given quiz, with its index.
    pub fn chapter_for_quiz(&self, quiz_id: &str) -> Option<(usize, &Chapter)> {
        self.chapters
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.quiz_id.as_deref() == Some(quiz_id))
    }
}

/// Lesson files are referenced by filename in the course structure but by
/// bare id everywhere else.
pub fn lesson_id(file: &str) -> &str {
    file.strip_suffix(".md").unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_id_strips_markdown_suffix() {
        assert_eq!(lesson_id("01-intro.md"), "01-intro");
        assert_eq!(lesson_id("01-intro"), "01-intro");
    }

    #[test]
    fn chapter_lookup_by_quiz() {
        let course = Course {
            id: "python-oop".into(),
            title: "Python OOP".into(),
            description: String::new(),
            chapters: vec![
                Chapter {
                    id: "ch1".into(),
                    title: "Basics".into(),
                    description: String::new(),
                    order: 1,
                    lessons: vec!["a.md".into(), "b.md".into()],
                    quiz_id: Some("quiz-01".into()),
                },
                Chapter {
                    id: "ch2".into(),
                    title: "Classes".into(),
                    description: String::new(),
                    order: 2,
                    lessons: vec!["c.md".into()],
                    quiz_id: None,
                },
            ],
        };

        assert_eq!(course.total_lessons(), 3);
        let (idx, chapter) = course.chapter_for_quiz("quiz-01").expect("chapter");
        assert_eq!(idx, 0);
        assert_eq!(chapter.id, "ch1");
        assert!(course.chapter_for_quiz("quiz-99").is_none());
    }
}
