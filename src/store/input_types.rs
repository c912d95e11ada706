use std::borrow::Cow;

use serde::Serialize;

use crate::constants::{DAY_OPTIONS, PRESET_DAY_CODES};
use crate::raw_types::RawCoursePatch;
use crate::types::{self, BoardError};
use crate::util;

/// How the days of a course are picked: one of the preset codes, or any combination of
/// single days.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DaySelection {
    /// One of `MWF`, `TuTh`, or `MW`.
    Preset(String),
    /// Any combination of `M`, `Tu`, `W`, `Th`, `F`, `Sa`, and `Su`, in the order that
    /// they were picked.
    Custom(Vec<String>),
}

impl DaySelection {
    /// Creates a preset selection, checking that the code is one of the presets.
    ///
    /// # Parameters
    /// - `code`: The preset code, e.g. `TuTh`.
    ///
    /// # Returns
    /// The selection, or `None` if `code` isn't a preset.
    pub fn preset(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref();
        PRESET_DAY_CODES
            .iter()
            .any(|(preset, _)| *preset == code)
            .then(|| Self::Preset(code.to_owned()))
    }

    /// Recovers the selection from a stored day code. Preset codes are matched exactly;
    /// everything else is broken into its tokens.
    ///
    /// # Parameters
    /// - `day_code`: The stored day code.
    ///
    /// # Returns
    /// The selection.
    pub fn from_day_code(day_code: &str) -> Self {
        Self::preset(day_code).unwrap_or_else(|| {
            Self::Custom(
                util::day_tokens(day_code)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            )
        })
    }

    /// Toggles a day in a custom selection. Nothing happens to a preset selection, or if
    /// `day` isn't a day token.
    ///
    /// # Parameters
    /// - `day`: The day token, e.g. `Sa`.
    pub fn toggle(&mut self, day: &str) {
        if !DAY_OPTIONS.contains(&day) {
            return;
        }

        if let Self::Custom(days) = self {
            if let Some(idx) = days.iter().position(|d| d == day) {
                days.remove(idx);
            } else {
                days.push(day.to_owned());
            }
        }
    }

    /// The day code that gets stored for this selection.
    pub fn day_code(&self) -> String {
        match self {
            Self::Preset(code) => code.clone(),
            Self::Custom(days) => days.join(""),
        }
    }
}

impl Default for DaySelection {
    fn default() -> Self {
        Self::Preset("MWF".to_owned())
    }
}

/// Checks that a time range is valid, returning it in its stored form.
fn build_time_range(start: &str, end: &str) -> types::Result<String> {
    let range = util::join_range(start, end)?;
    let (start_min, end_min) = util::parse_range(&range)?;
    if start_min >= end_min {
        return Err(BoardError::InputError("end", "end time must be after start time."));
    }

    Ok(range)
}

/// Use this struct to add a course to the schedule.
///
/// Prefer using the `CourseAddBuilder` to construct this object.
#[derive(Debug, Clone, Serialize)]
pub struct CourseAdd<'a> {
    /// The subject name. For example, `Biology`.
    #[serde(rename = "subject")]
    pub subject: Cow<'a, str>,
    /// The day code. For example, `MWF`.
    #[serde(rename = "day")]
    pub day_code: String,
    /// The time range in its stored form, e.g. `08:00–09:00`.
    #[serde(rename = "time")]
    pub time: String,
    /// When this course was created.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl<'a> CourseAdd<'a> {
    /// Creates a builder to construct this `CourseAdd` object.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> CourseAddBuilder<'a> {
        CourseAddBuilder::new()
    }
}

pub struct CourseAddBuilder<'a> {
    subject: Option<Cow<'a, str>>,
    days: DaySelection,
    start: Option<Cow<'a, str>>,
    end: Option<Cow<'a, str>>,
}

impl<'a> CourseAddBuilder<'a> {
    /// Creates a new builder for the `CourseAdd` structure. The days default to `MWF`.
    ///
    /// # Returns
    /// The builder.
    pub fn new() -> Self {
        CourseAddBuilder {
            subject: None,
            days: DaySelection::default(),
            start: None,
            end: None,
        }
    }

    /// Sets the subject name for this builder.
    ///
    /// # Parameters
    /// - `subject`: The subject name.
    ///
    /// # Returns
    /// The builder.
    pub fn with_subject(mut self, subject: impl Into<Cow<'a, str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the days for this builder.
    ///
    /// # Parameters
    /// - `days`: The day selection.
    ///
    /// # Returns
    /// The builder.
    pub fn with_days(mut self, days: DaySelection) -> Self {
        self.days = days;
        self
    }

    /// Sets the start time for this builder, in 24-hour form (e.g. `8:00` or `08:00`).
    ///
    /// # Parameters
    /// - `start`: The start time.
    ///
    /// # Returns
    /// The builder.
    pub fn with_start_time(mut self, start: impl Into<Cow<'a, str>>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the end time for this builder, in 24-hour form (e.g. `9:15` or `09:15`).
    ///
    /// # Parameters
    /// - `end`: The end time.
    ///
    /// # Returns
    /// The builder.
    pub fn with_end_time(mut self, end: impl Into<Cow<'a, str>>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Tries to build the `CourseAdd` object.
    ///
    /// # Returns
    /// The `CourseAdd` object if the subject, days, start time, and end time are all
    /// provided and valid. Otherwise, the error describing the first problem found.
    pub fn try_build(self) -> types::Result<CourseAdd<'a>> {
        let subject = match self.subject {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(BoardError::InputError("subject", "subject must not be empty.")),
        };

        let day_code = self.days.day_code();
        if util::parse_day_code(&day_code).is_empty() {
            return Err(BoardError::InputError("days", "at least one day must be picked."));
        }

        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(BoardError::InputError("time", "start and end times are required."));
        };

        Ok(CourseAdd {
            subject,
            day_code,
            time: build_time_range(&start, &end)?,
            created_at: util::now_iso8601(),
        })
    }
}

impl<'a> Default for CourseAddBuilder<'a> {
    fn default() -> Self {
        CourseAddBuilder::new()
    }
}

/// Use this struct to change an existing course. Any field that is `None` is left as-is.
///
/// Prefer using the `CourseEditBuilder` to construct this object.
#[derive(Debug, Clone, Default)]
pub struct CourseEdit<'a> {
    /// The new subject name.
    pub subject: Option<Cow<'a, str>>,
    /// The new day code.
    pub day_code: Option<String>,
    /// The new time range, in its stored form.
    pub time: Option<String>,
}

impl<'a> CourseEdit<'a> {
    /// Creates a builder to construct this `CourseEdit` object.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> CourseEditBuilder<'a> {
        CourseEditBuilder::new()
    }

    /// Whether this edit would change anything.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.day_code.is_none() && self.time.is_none()
    }

    pub(crate) fn to_patch(&self) -> RawCoursePatch {
        RawCoursePatch {
            subject: self.subject.as_ref().map(|s| s.to_string()),
            day: self.day_code.clone(),
            time: self.time.clone(),
        }
    }
}

pub struct CourseEditBuilder<'a> {
    subject: Option<Cow<'a, str>>,
    days: Option<DaySelection>,
    times: Option<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> CourseEditBuilder<'a> {
    /// Creates a new builder for the `CourseEdit` structure.
    ///
    /// # Returns
    /// The builder.
    pub fn new() -> Self {
        CourseEditBuilder {
            subject: None,
            days: None,
            times: None,
        }
    }

    /// Sets the new subject name.
    ///
    /// # Parameters
    /// - `subject`: The subject name.
    ///
    /// # Returns
    /// The builder.
    pub fn with_subject(mut self, subject: impl Into<Cow<'a, str>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the new days.
    ///
    /// # Parameters
    /// - `days`: The day selection.
    ///
    /// # Returns
    /// The builder.
    pub fn with_days(mut self, days: DaySelection) -> Self {
        self.days = Some(days);
        self
    }

    /// Sets the new start and end times. Both must be given together, since they are
    /// stored as one range.
    ///
    /// # Parameters
    /// - `start`: The start time.
    /// - `end`: The end time.
    ///
    /// # Returns
    /// The builder.
    pub fn with_times(
        mut self,
        start: impl Into<Cow<'a, str>>,
        end: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.times = Some((start.into(), end.into()));
        self
    }

    /// Tries to build the `CourseEdit` object.
    ///
    /// # Returns
    /// The `CourseEdit` object if every field that was given is valid.
    pub fn try_build(self) -> types::Result<CourseEdit<'a>> {
        if matches!(&self.subject, Some(s) if s.trim().is_empty()) {
            return Err(BoardError::InputError("subject", "subject must not be empty."));
        }

        let day_code = self.days.map(|d| d.day_code());
        if matches!(&day_code, Some(code) if util::parse_day_code(code).is_empty()) {
            return Err(BoardError::InputError("days", "at least one day must be picked."));
        }

        let time = match self.times {
            Some((start, end)) => Some(build_time_range(&start, &end)?),
            None => None,
        };

        Ok(CourseEdit {
            subject: self.subject,
            day_code,
            time,
        })
    }
}

impl<'a> Default for CourseEditBuilder<'a> {
    fn default() -> Self {
        CourseEditBuilder::new()
    }
}

/// Use this struct to add a quiz to a course.
///
/// Prefer using the `QuizAddBuilder` to construct this object.
#[derive(Debug, Clone, Serialize)]
pub struct QuizAdd<'a> {
    /// The ID of the course that this quiz is for. This is where the quiz gets nested.
    #[serde(skip)]
    pub subject_id: Cow<'a, str>,
    /// The subject name. This is copied from the course.
    #[serde(rename = "subject")]
    pub subject: Cow<'a, str>,
    /// The lesson that the quiz covers.
    #[serde(rename = "lesson")]
    pub lesson: Cow<'a, str>,
    /// The day of the quiz, as a single token (e.g. `F`).
    #[serde(rename = "day")]
    pub day: Cow<'a, str>,
    /// When this quiz was created.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl<'a> QuizAdd<'a> {
    /// Creates a builder to construct this `QuizAdd` object.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> QuizAddBuilder<'a> {
        QuizAddBuilder::new()
    }
}

pub struct QuizAddBuilder<'a> {
    subject_id: Option<Cow<'a, str>>,
    subject: Option<Cow<'a, str>>,
    lesson: Option<Cow<'a, str>>,
    day: Option<Cow<'a, str>>,
}

impl<'a> QuizAddBuilder<'a> {
    /// Creates a new builder for the `QuizAdd` structure.
    ///
    /// # Returns
    /// The builder.
    pub fn new() -> Self {
        QuizAddBuilder {
            subject_id: None,
            subject: None,
            lesson: None,
            day: None,
        }
    }

    /// Sets the course for this quiz, from its ID and subject name.
    ///
    /// # Parameters
    /// - `subject_id`: The course ID.
    /// - `subject`: The subject name.
    ///
    /// # Returns
    /// The builder.
    pub fn with_course(
        mut self,
        subject_id: impl Into<Cow<'a, str>>,
        subject: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.subject_id = Some(subject_id.into());
        self.subject = Some(subject.into());
        self
    }

    /// Sets the lesson for this quiz.
    ///
    /// # Parameters
    /// - `lesson`: The lesson.
    ///
    /// # Returns
    /// The builder.
    pub fn with_lesson(mut self, lesson: impl Into<Cow<'a, str>>) -> Self {
        self.lesson = Some(lesson.into());
        self
    }

    /// Sets the day for this quiz.
    ///
    /// # Parameters
    /// - `day`: A single day token, e.g. `Th`.
    ///
    /// # Returns
    /// The builder.
    pub fn with_day(mut self, day: impl Into<Cow<'a, str>>) -> Self {
        self.day = Some(day.into());
        self
    }

    /// Tries to build the `QuizAdd` object.
    ///
    /// # Returns
    /// The `QuizAdd` object if the course, a non-empty lesson, and a valid day were given.
    pub fn try_build(self) -> types::Result<QuizAdd<'a>> {
        let (Some(subject_id), Some(subject)) = (self.subject_id, self.subject) else {
            return Err(BoardError::InputError("subject", "a course must be picked."));
        };

        let lesson = match self.lesson {
            Some(l) if !l.trim().is_empty() => l,
            _ => return Err(BoardError::InputError("lesson", "lesson must not be empty.")),
        };

        let day = match self.day {
            Some(d) if util::token_to_day(&d).is_some() => d,
            _ => return Err(BoardError::InputError("day", "day must be a single day token.")),
        };

        Ok(QuizAdd {
            subject_id,
            subject,
            lesson,
            day,
            created_at: util::now_iso8601(),
        })
    }
}

impl<'a> Default for QuizAddBuilder<'a> {
    fn default() -> Self {
        QuizAddBuilder::new()
    }
}
