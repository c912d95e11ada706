pub mod constants;
pub mod dashboard;
pub mod parser;
pub mod raw_types;
pub mod schedule;
pub mod store;
pub mod types;
pub mod util;

// Re-exporting these dependencies since they might be helpful for manual parsing.
pub use chrono;
pub use reqwest;
pub use serde;
pub use serde_json;
