//! The dashboard: everything shown to a signed-in user, derived from their courses and
//! quizzes.
//!
//! [`derive_view`] is a pure function of the courses, quizzes, and time. [`Dashboard`]
//! adds the one piece of state that has to survive between refreshes, which is the set
//! of quizzes whose deletion has already been requested.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::schedule::{expand_sessions, find_expired, resolve};
use crate::types::{CourseRecord, Courses, DashboardView, QuizKey, QuizRecord, Quizzes};
use crate::util;

pub mod config;
pub mod runtime;

pub use config::DashboardConfig;
pub use runtime::DashboardRuntime;

/// Derives the dashboard from scratch.
///
/// # Parameters
/// - `courses`: The courses in the schedule.
/// - `quizzes`: The quizzes being tracked.
/// - `now`: The current wall-clock time.
///
/// # Returns
/// The view.
pub fn derive_view(
    courses: &[CourseRecord],
    quizzes: &[QuizRecord],
    now: &NaiveDateTime,
) -> DashboardView {
    let sessions = expand_sessions(courses);
    let status = resolve(&sessions, now);
    let expired_quizzes = find_expired(quizzes, courses, now)
        .into_iter()
        .map(QuizKey::from)
        .collect();

    let mut quizzes_by_course: HashMap<String, usize> = HashMap::new();
    for quiz in quizzes {
        *quizzes_by_course.entry(quiz.subject_id.clone()).or_default() += 1;
    }

    DashboardView {
        total_subjects: courses.len(),
        date: util::format_long_date(&now.date()),
        sessions,
        status,
        expired_quizzes,
        quizzes_by_course,
    }
}

/// The result of refreshing the dashboard.
#[derive(Debug, Clone)]
pub struct Refresh {
    /// The new view.
    pub view: DashboardView,
    /// The quizzes that should be deleted now. A quiz appears here once, even if the
    /// dashboard is refreshed again before the deletion shows up in a snapshot.
    pub to_delete: Vec<QuizKey>,
}

/// The latest snapshots of a user's courses and quizzes.
#[derive(Debug, Default)]
pub struct Dashboard {
    courses: Courses,
    quizzes: Quizzes,
    pending_deletes: HashSet<QuizKey>,
}

impl Dashboard {
    /// Creates an empty dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the courses with a new snapshot.
    ///
    /// # Parameters
    /// - `courses`: The full list of courses.
    pub fn set_courses(&mut self, courses: Courses) {
        self.courses = courses;
    }

    /// Replaces the quizzes with a new snapshot. Any quiz that was waiting to be deleted
    /// and is no longer in the snapshot is considered deleted.
    ///
    /// # Parameters
    /// - `quizzes`: The full list of quizzes.
    pub fn set_quizzes(&mut self, quizzes: Quizzes) {
        let present = quizzes.iter().map(QuizKey::from).collect::<HashSet<_>>();
        self.pending_deletes.retain(|key| present.contains(key));
        self.quizzes = quizzes;
    }

    /// The latest courses.
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// The latest quizzes.
    pub fn quizzes(&self) -> &[QuizRecord] {
        &self.quizzes
    }

    /// Whether a deletion has been requested for the quiz and hasn't shown up yet.
    pub fn is_pending(&self, key: &QuizKey) -> bool {
        self.pending_deletes.contains(key)
    }

    /// Derives the view for the given time and picks out the quizzes that need to be
    /// deleted.
    ///
    /// # Parameters
    /// - `now`: The current wall-clock time.
    ///
    /// # Returns
    /// The view, and the quizzes to delete that haven't been requested before.
    pub fn refresh(&mut self, now: &NaiveDateTime) -> Refresh {
        let view = derive_view(&self.courses, &self.quizzes, now);
        let to_delete = view
            .expired_quizzes
            .iter()
            .filter(|key| self.pending_deletes.insert((*key).clone()))
            .cloned()
            .collect::<Vec<_>>();

        if !to_delete.is_empty() {
            debug!("{} quiz(zes) expired", to_delete.len());
        }

        Refresh { view, to_delete }
    }

    /// Marks a requested deletion as failed, so that the quiz is picked up again on the
    /// next refresh.
    ///
    /// # Parameters
    /// - `key`: The quiz.
    pub fn deletion_failed(&mut self, key: &QuizKey) {
        self.pending_deletes.remove(key);
    }
}
