use crate::types::DayNum;

pub(crate) const MY_USER_AGENT: &str = concat!("classboard/", env!("CARGO_PKG_VERSION"));

/// Separator between the start and end of a stored time range. This is an en-dash,
/// not a hyphen.
pub const RANGE_SEPARATOR: char = '–';

/// Weekday tokens, indexed by weekday number (`0` is Sunday).
pub const DAY_TOKENS: [&str; 7] = ["Su", "M", "Tu", "W", "Th", "F", "Sa"];

/// The order in which tokens are matched when parsing a custom day code. Two-letter
/// tokens come before any one-letter token so that they are never split.
pub(crate) const TOKEN_PRECEDENCE: [(&str, DayNum); 7] = [
    ("Su", 0),
    ("Sa", 6),
    ("Th", 4),
    ("Tu", 2),
    ("M", 1),
    ("W", 3),
    ("F", 5),
];

/// The preset day codes, which are matched exactly before any custom parsing.
pub(crate) const PRESET_DAY_CODES: [(&str, &[DayNum]); 3] =
    [("MWF", &[1, 3, 5]), ("TuTh", &[2, 4]), ("MW", &[1, 3])];

/// The day options offered when picking days, in display order.
pub const DAY_OPTIONS: [&str; 7] = ["M", "Tu", "W", "Th", "F", "Sa", "Su"];

pub(crate) const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

// Store paths
pub(crate) const USERS_ROOT: &str = "users";
pub(crate) const SCHEDULE_NODE: &str = "schedule";
pub(crate) const QUIZZES_NODE: &str = "quizzes";

pub(crate) const PERMISSION_DENIED: &str = "Permission denied";

// Event stream
pub(crate) const EVENT_STREAM: &str = "text/event-stream";
pub(crate) const EVENT_PUT: &str = "put";
pub(crate) const EVENT_PATCH: &str = "patch";
pub(crate) const EVENT_KEEP_ALIVE: &str = "keep-alive";
pub(crate) const EVENT_CANCEL: &str = "cancel";
pub(crate) const EVENT_AUTH_REVOKED: &str = "auth_revoked";
