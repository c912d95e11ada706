use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;

/// The generic type is the return value. Otherwise, regardless of the operation,
/// we're just returning the error if there is one.
pub type Result<T, E = BoardError> = std::result::Result<T, E>;

/// All courses in a person's schedule.
pub type Courses = Vec<CourseRecord>;

/// All quizzes that a person is tracking, across every course.
pub type Quizzes = Vec<QuizRecord>;

/// The weekly sessions derived from a list of courses.
pub type Sessions = Vec<ExpandedSession>;

/// The type that will be used to represent hours and minutes.
pub type TimeType = u32;

/// The type that will be used to represent a weekday, where `0` is Sunday and `6` is
/// Saturday.
pub type DayNum = u8;

/// A course (class) in a person's weekly schedule.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CourseRecord {
    /// The ID assigned to this course by the store. For example, `-NxR3abc`.
    pub id: String,
    /// The subject name. For example, `Biology`.
    pub subject: String,
    /// The day code, i.e. the days that this course meets. For example, `MWF` or `TuTh`.
    pub day_code: String,
    /// The time range, in the form `HH:MM–HH:MM` (separated by an en-dash). For example,
    /// `08:00–09:00`.
    pub time: String,
    /// When this course was created, as an ISO-8601 timestamp.
    pub created_at: String,
}

impl Display for CourseRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}] {}", self.id, self.subject)?;
        writeln!(f, "\tDays: {}", self.day_code)?;
        match crate::util::format_range(&self.time) {
            Ok(range) => writeln!(f, "\tTime: {range}"),
            Err(_) => writeln!(f, "\tTime: {} (malformed)", self.time),
        }
    }
}

/// A single weekly occurrence of a course. For example, a `MWF` course expands into
/// three sessions: one on Monday, one on Wednesday, and one on Friday.
///
/// Sessions are always derived from the courses and are never stored.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct ExpandedSession {
    /// The ID of the course that this session came from.
    pub source_course_id: String,
    /// The subject name.
    pub subject: String,
    /// The weekday, where `0` is Sunday and `6` is Saturday.
    pub weekday: DayNum,
    /// The start time, in minutes since midnight. For example, 08:30 is `510`.
    pub start_minute: TimeType,
    /// The end time, in minutes since midnight. This is always after `start_minute`.
    pub end_minute: TimeType,
}

impl ExpandedSession {
    /// Checks whether this session covers the given minute of its weekday. The start
    /// is inclusive and the end is exclusive.
    ///
    /// # Parameters
    /// - `minute`: The minute since midnight.
    ///
    /// # Returns
    /// `true` if the session is in progress at that minute and `false` otherwise.
    pub fn covers(&self, minute: TimeType) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }
}

impl Display for ExpandedSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "[{}] {} at {} - {}",
            crate::util::day_token(self.weekday).unwrap_or("?"),
            self.subject,
            crate::util::minutes_to_12_hour(self.start_minute),
            crate::util::minutes_to_12_hour(self.end_minute)
        )
    }
}

/// A quiz reminder attached to a course.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct QuizRecord {
    /// The ID assigned to this quiz by the store.
    pub id: String,
    /// The ID of the course that this quiz belongs to.
    pub subject_id: String,
    /// The subject name at the time the quiz was added. This is a snapshot, so it will
    /// not follow a rename of the course.
    pub subject: String,
    /// The lesson that the quiz covers.
    pub lesson: String,
    /// The day of the quiz, as a single weekday token (e.g. `F`).
    pub day: String,
    /// When this quiz was created, as an ISO-8601 timestamp.
    pub created_at: String,
}

impl Display for QuizRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}] {}: {} ({})", self.id, self.subject, self.lesson, self.day)
    }
}

/// The key that identifies a quiz in the store. Quizzes are nested under their course,
/// so both IDs are needed to address one.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct QuizKey {
    /// The ID of the course that the quiz is nested under.
    pub subject_id: String,
    /// The quiz ID.
    pub quiz_id: String,
}

impl From<&QuizRecord> for QuizKey {
    fn from(quiz: &QuizRecord) -> Self {
        Self {
            subject_id: quiz.subject_id.clone(),
            quiz_id: quiz.id.clone(),
        }
    }
}

/// What is happening right now, and what is coming up next.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct SessionStatus {
    /// The subject of the session in progress, if any.
    pub current: Option<String>,
    /// The subject of the next session to start, if any.
    pub next: Option<String>,
}

impl SessionStatus {
    /// The text to display for the current subject.
    ///
    /// # Returns
    /// The current subject, or `None` if no class is in progress.
    pub fn current_display(&self) -> &str {
        self.current.as_deref().unwrap_or("None")
    }

    /// The text to display for the next subject.
    ///
    /// # Returns
    /// The next subject, or `N/A` if there are no sessions at all.
    pub fn next_display(&self) -> &str {
        self.next.as_deref().unwrap_or("N/A")
    }
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current Subject: {}", self.current_display())?;
        writeln!(f, "Next Subject: {}", self.next_display())
    }
}

/// Everything that the dashboard shows, derived from the courses, the quizzes, and the
/// current time.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct DashboardView {
    /// The number of courses in the schedule.
    pub total_subjects: usize,
    /// The long-form date, e.g. `Friday, October 17, 2025`.
    pub date: String,
    /// All weekly sessions, sorted by weekday and then start time.
    pub sessions: Sessions,
    /// The current and next subjects.
    pub status: SessionStatus,
    /// Quizzes whose session has ended today. These should be removed from the store.
    pub expired_quizzes: Vec<QuizKey>,
    /// The number of quizzes attached to each course, keyed by course ID.
    pub quizzes_by_course: HashMap<String, usize>,
}

#[derive(Error, Debug)]
pub enum BoardError {
    /// Occurs if there was an error encountered by the reqwest library.
    #[error("Request error occurred: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Occurs when there was an error parsing the URL.
    #[error("Malformed url: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Occurs when the given input is not valid.
    #[error("Invalid input for '{0}' provided: {1}")]
    InputError(&'static str, &'static str),

    /// Occurs when there was an error with serde. This error will most likely occur if
    /// the store returned data that isn't in the expected shape.
    #[error("Serde error occurred: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Occurs when a file (e.g., a configuration file) couldn't be read.
    #[error("IO error occurred: {0}")]
    IoError(#[from] std::io::Error),

    /// Occurs if a time string isn't formatted correctly. For example, `9am` or
    /// `08:00-09:00` (hyphen instead of an en-dash) would cause this error.
    #[error("Malformed time value: {0}")]
    FormatError(String),

    /// Occurs when the store returns a bad status code. This also includes some context
    /// as to why the error may occur, if the store gave one.
    #[error("Unsuccessful status code: {0} (context: {1:?})")]
    BadStatusCode(u16, Option<String>),

    /// Occurs when the store returned an error message.
    #[error("Error from the store: {0}")]
    StoreError(String),

    /// Occurs when the store rejects the auth token. Usually, this means the token has
    /// expired or belongs to a different user.
    #[error("Permission denied. Is your auth token valid?")]
    PermissionDenied,
}
