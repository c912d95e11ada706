use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::raw_types::{RawCourseRecord, RawQuizRecord, RawQuizzes, RawSchedule};
use crate::types::{CourseRecord, Courses, QuizRecord, Quizzes};

/// Processes the raw schedule collection.
///
/// The store keeps courses in a map keyed by ID, which has no useful order. The courses
/// are returned in the order that they were created, so that a table of them doesn't
/// shuffle around between snapshots.
///
/// An entry that isn't a course (for example, one that was only partly written and has
/// no time yet) is skipped. The other courses are still returned.
///
/// # Parameters
/// - `raw`: The raw schedule collection. `None` means the collection is empty.
///
/// # Returns
/// The courses.
pub fn parse_courses(raw: RawSchedule) -> Courses {
    let mut courses = raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<RawCourseRecord>(value) {
            Ok(course) => Some(CourseRecord {
                id,
                subject: course.subject.trim().to_owned(),
                day_code: course.day.trim().to_owned(),
                time: course.time.trim().to_owned(),
                created_at: course.created_at,
            }),
            Err(e) => {
                warn!("Skipping unreadable course {id}: {e}");
                None
            }
        })
        .collect::<Vec<_>>();

    courses.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    courses
}

/// Processes the raw quiz collection. Quizzes are nested under the ID of the course they
/// belong to, so the collection is flattened here.
///
/// A quiz without a day is kept, with an empty day. Such a quiz is never expired
/// automatically. Entries that aren't quizzes at all are skipped.
///
/// # Parameters
/// - `raw`: The raw quiz collection. `None` means the collection is empty.
///
/// # Returns
/// The quizzes, ordered by creation time.
pub fn parse_quizzes(raw: RawQuizzes) -> Quizzes {
    let mut quizzes = vec![];
    for (subject_id, by_id) in raw.unwrap_or_default() {
        let by_id = match serde_json::from_value::<HashMap<String, Value>>(by_id) {
            Ok(by_id) => by_id,
            Err(e) => {
                warn!("Skipping unreadable quizzes under {subject_id}: {e}");
                continue;
            }
        };

        for (id, value) in by_id {
            match serde_json::from_value::<RawQuizRecord>(value) {
                Ok(quiz) => quizzes.push(QuizRecord {
                    id,
                    subject_id: subject_id.clone(),
                    subject: quiz.subject,
                    lesson: quiz.lesson,
                    day: quiz.day.unwrap_or_default().trim().to_owned(),
                    created_at: quiz.created_at,
                }),
                Err(e) => warn!("Skipping unreadable quiz {subject_id}/{id}: {e}"),
            }
        }
    }

    quizzes.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    quizzes
}
