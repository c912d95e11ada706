use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A course, as it is stored under `users/{uid}/schedule/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawCourseRecord {
    /// The subject name.
    #[serde(rename = "subject")]
    pub subject: String,

    /// The day code, e.g. `MWF`.
    #[serde(rename = "day")]
    #[serde(default)]
    pub day: String,

    /// The time range, e.g. `08:00–09:00`.
    #[serde(rename = "time")]
    pub time: String,

    /// When the course was created. Older entries may not have this.
    #[serde(rename = "createdAt")]
    #[serde(default)]
    pub created_at: String,
}

/// A partial update to a course. Only the fields that are present are changed.
#[derive(Serialize, Debug, Clone, Default)]
pub struct RawCoursePatch {
    #[serde(rename = "subject")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(rename = "day")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    #[serde(rename = "time")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A quiz, as it is stored under `users/{uid}/quizzes/{subject_id}/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawQuizRecord {
    /// The subject name at the time the quiz was added.
    #[serde(rename = "subject")]
    #[serde(default)]
    pub subject: String,

    /// The lesson.
    #[serde(rename = "lesson")]
    #[serde(default)]
    pub lesson: String,

    /// A single weekday token, e.g. `F`. Older entries may not have this.
    #[serde(rename = "day")]
    #[serde(default)]
    pub day: Option<String>,

    #[serde(rename = "createdAt")]
    #[serde(default)]
    pub created_at: String,
}

/// The full schedule collection. The store returns `null` if there are no courses.
///
/// Entries are kept as plain JSON and decoded one at a time, so that one half-written
/// course doesn't make the whole collection unreadable.
pub type RawSchedule = Option<HashMap<String, serde_json::Value>>;

/// The full quiz collection, keyed by subject ID and then quiz ID. The store returns
/// `null` if there are no quizzes. Like [`RawSchedule`], each subject's quizzes are decoded
/// separately.
pub type RawQuizzes = Option<HashMap<String, serde_json::Value>>;

/// The response to a `POST`, which contains the generated key.
#[derive(Deserialize, Debug)]
pub struct RawPushResponse {
    #[serde(rename = "name")]
    pub name: String,
}

/// The body of an error response from the store.
#[derive(Deserialize, Debug)]
pub struct RawStoreError {
    #[serde(rename = "error")]
    pub error: String,
}

/// The payload of a `put` or `patch` event from the event stream.
#[derive(Deserialize, Debug)]
pub struct RawStreamEvent {
    #[serde(rename = "path")]
    pub path: String,

    #[serde(rename = "data")]
    pub data: serde_json::Value,
}
