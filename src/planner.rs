use tracing::{debug, info};

use crate::error::DashboardError;
use crate::models::{Lesson, QueueItem, SubjectLessons};
use crate::sync::Delivery;

/// Lessons picked for tomorrow, in the order they were picked. No two items
/// share an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonQueue {
    items: Vec<QueueItem>,
}

impl LessonQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the lesson unless an item with the same id is already queued.
    pub fn add(&mut self, lesson: &Lesson, subject: &str) -> &[QueueItem] {
        if self.contains(&lesson.id) {
            debug!(lesson = %lesson.id, "lesson already queued");
        } else {
            self.items.push(QueueItem::from_lesson(lesson, subject));
            debug!(lesson = %lesson.id, subject, queued = self.items.len(), "lesson queued");
        }
        &self.items
    }

    pub fn remove(&mut self, lesson_id: &str) -> &[QueueItem] {
        let before = self.items.len();
        self.items.retain(|item| item.id != lesson_id);
        if self.items.len() < before {
            debug!(lesson = lesson_id, queued = self.items.len(), "lesson removed");
        }
        &self.items
    }

    /// Returns how many lessons were queued and empties the queue.
    pub fn confirm(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        info!(count, "lesson queue confirmed");
        count
    }

    /// Hands the current snapshot to `delivery`, then behaves like `confirm`.
    pub fn push_to(&mut self, delivery: &mut dyn Delivery) -> usize {
        delivery.deliver_lessons(&self.items);
        self.confirm()
    }

    pub fn contains(&self, lesson_id: &str) -> bool {
        self.items.iter().any(|item| item.id == lesson_id)
    }

    /// 1-based display position.
    pub fn position(&self, lesson_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.id == lesson_id)
            .map(|index| index + 1)
    }

    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Finds a lesson by id across every subject.
pub fn find_lesson<'a>(
    catalog: &'a [SubjectLessons],
    lesson_id: &str,
) -> Result<(&'a str, &'a Lesson), DashboardError> {
    catalog
        .iter()
        .find_map(|entry| {
            entry
                .lessons
                .iter()
                .find(|lesson| lesson.id == lesson_id)
                .map(|lesson| (entry.subject.as_str(), lesson))
        })
        .ok_or_else(|| DashboardError::UnknownLesson(lesson_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SimulatedSync;

    fn lesson(id: &str, title: &str) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: title.to_string(),
            chapter: "Chapter 3".to_string(),
        }
    }

    fn has_unique_ids(queue: &LessonQueue) -> bool {
        let mut ids: Vec<&str> = queue.items().iter().map(|item| item.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == queue.len()
    }

    #[test]
    fn adding_twice_keeps_one_item() {
        let mut queue = LessonQueue::new();
        let fractions = lesson("m1", "Fractions");

        let items = queue.add(&fractions, "Mathematics");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "m1");
        assert_eq!(items[0].subject, "Mathematics");

        queue.add(&fractions, "Mathematics");
        assert_eq!(queue.len(), 1);
        assert!(has_unique_ids(&queue));
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut queue = LessonQueue::new();
        queue.add(&lesson("s2", "Photosynthesis"), "Science");
        queue.add(&lesson("m1", "Fractions"), "Mathematics");
        queue.add(&lesson("s2", "Photosynthesis"), "Science");
        queue.add(&lesson("e4", "Tenses"), "English");

        let ids: Vec<&str> = queue.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "m1", "e4"]);
        assert_eq!(queue.position("e4"), Some(3));
        assert_eq!(queue.position("x9"), None);
        assert!(has_unique_ids(&queue));
    }

    #[test]
    fn removing_twice_is_a_no_op() {
        let mut queue = LessonQueue::new();
        queue.add(&lesson("m1", "Fractions"), "Mathematics");
        queue.add(&lesson("m2", "Decimals"), "Mathematics");

        assert_eq!(queue.remove("m1").len(), 1);
        let after_second = queue.remove("m1").to_vec();
        assert_eq!(after_second.len(), 1);
        assert_eq!(after_second[0].id, "m2");
        assert!(!queue.contains("m1"));
    }

    #[test]
    fn confirm_returns_count_and_empties() {
        let mut queue = LessonQueue::new();
        assert_eq!(queue.confirm(), 0);

        queue.add(&lesson("m1", "Fractions"), "Mathematics");
        queue.add(&lesson("s1", "Cells"), "Science");
        assert_eq!(queue.confirm(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.confirm(), 0);
    }

    #[test]
    fn push_delivers_snapshot_before_clearing() {
        let mut queue = LessonQueue::new();
        let mut sync = SimulatedSync::new();
        queue.add(&lesson("m1", "Fractions"), "Mathematics");
        queue.add(&lesson("s1", "Cells"), "Science");

        assert_eq!(queue.push_to(&mut sync), 2);
        assert!(queue.is_empty());
        assert_eq!(
            sync.receipts()[0].summary,
            "2 lessons for tomorrow's sync [m1, s1]"
        );
    }

    #[test]
    fn catalog_lookup_reports_subject() {
        let catalog = vec![
            SubjectLessons {
                subject: "Mathematics".to_string(),
                lessons: vec![lesson("m1", "Fractions")],
            },
            SubjectLessons {
                subject: "Science".to_string(),
                lessons: vec![lesson("s1", "Cells")],
            },
        ];

        let (subject, found) = find_lesson(&catalog, "s1").unwrap();
        assert_eq!(subject, "Science");
        assert_eq!(found.title, "Cells");
        assert!(matches!(
            find_lesson(&catalog, "zz"),
            Err(DashboardError::UnknownLesson(id)) if id == "zz"
        ));
    }
}
