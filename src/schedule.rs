//! The scheduling logic: expanding courses into weekly sessions, finding the current and
//! next sessions, and deciding when a quiz has expired.
//!
//! Everything here is a pure function of its inputs. Nothing is cached between calls, so
//! callers should recompute whenever the courses, quizzes, or time change.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::types::{CourseRecord, DayNum, ExpandedSession, QuizRecord, Sessions, SessionStatus};
use crate::util;

/// Expands each course into one session per day that it meets.
///
/// A course whose time range can't be parsed, or whose start isn't before its end,
/// produces no sessions. It does not affect any other course.
///
/// # Parameters
/// - `courses`: The courses.
///
/// # Returns
/// The sessions, sorted by weekday and then by start time.
pub fn expand_sessions<'a, I>(courses: I) -> Sessions
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let mut sessions: Sessions = vec![];
    for course in courses {
        let (start_minute, end_minute) = match util::parse_range(&course.time) {
            Ok((start, end)) if start < end => (start, end),
            Ok(_) => {
                warn!(
                    "Course '{}' ({}) ends before it starts: {}",
                    course.subject, course.id, course.time
                );
                continue;
            }
            Err(e) => {
                warn!("Skipping course '{}' ({}): {e}", course.subject, course.id);
                continue;
            }
        };

        sessions.extend(
            util::parse_day_code(&course.day_code)
                .into_iter()
                .map(|weekday| ExpandedSession {
                    source_course_id: course.id.clone(),
                    subject: course.subject.clone(),
                    weekday,
                    start_minute,
                    end_minute,
                }),
        );
    }

    // Stable, so sessions that tie keep the order of the courses they came from.
    sessions.sort_by_key(|s| (s.weekday, s.start_minute));
    sessions
}

/// Finds the session in progress and the next session to start.
///
/// The current session is the first session today that covers the current minute. The
/// next session is the earliest one later today; if there isn't one, it is the first
/// session on the following days, wrapping around to today's sessions next week. The
/// session in progress is never reported as the next one.
///
/// # Parameters
/// - `sessions`: The sessions, sorted as returned by [`expand_sessions`].
/// - `now`: The current wall-clock time.
///
/// # Returns
/// The current and next subjects.
pub fn resolve(sessions: &[ExpandedSession], now: &NaiveDateTime) -> SessionStatus {
    let today = util::weekday_num(now);
    let now_minutes = util::minute_of_day(now);

    let current = sessions
        .iter()
        .find(|s| s.weekday == today && s.covers(now_minutes));

    let later_today = sessions
        .iter()
        .find(|s| s.weekday == today && s.start_minute > now_minutes);

    let next = later_today.or_else(|| {
        (1..=7).find_map(|offset: DayNum| {
            let day = (today + offset) % 7;
            sessions
                .iter()
                .find(|s| s.weekday == day && !current.is_some_and(|c| std::ptr::eq(c, *s)))
        })
    });

    SessionStatus {
        current: current.map(|s| s.subject.clone()),
        next: next.map(|s| s.subject.clone()),
    }
}

/// Checks whether a quiz should be removed because its class has ended for today.
///
/// # Parameters
/// - `quiz`: The quiz.
/// - `course`: The course that the quiz belongs to. If the course no longer exists, pass
///   `None`; the quiz is then never expired automatically.
/// - `now`: The current wall-clock time.
///
/// # Returns
/// `true` if the quiz is for today and today's class has ended, and `false` otherwise.
pub fn should_expire(quiz: &QuizRecord, course: Option<&CourseRecord>, now: &NaiveDateTime) -> bool {
    let Some(course) = course else {
        return false;
    };

    if util::day_token(util::weekday_num(now)) != Some(quiz.day.as_str()) {
        return false;
    }

    let end = match util::split_range(&course.time).and_then(|(_, end)| util::to_minutes(end)) {
        Ok(end) => end,
        Err(e) => {
            warn!("Can't check expiry of quiz {} ({}): {e}", quiz.id, quiz.lesson);
            return false;
        }
    };

    match now.date().and_hms_opt(end / 60, end % 60, 0) {
        Some(end_time) => *now > end_time,
        None => false,
    }
}

/// Finds all quizzes that should be removed.
///
/// # Parameters
/// - `quizzes`: The quizzes.
/// - `courses`: The courses, used to look up each quiz's class time.
/// - `now`: The current wall-clock time.
///
/// # Returns
/// The quizzes that have expired, in the order given.
pub fn find_expired<'a>(
    quizzes: &'a [QuizRecord],
    courses: &[CourseRecord],
    now: &NaiveDateTime,
) -> Vec<&'a QuizRecord> {
    quizzes
        .iter()
        .filter(|quiz| {
            let course = courses.iter().find(|c| c.id == quiz.subject_id);
            should_expire(quiz, course, now)
        })
        .collect()
}
