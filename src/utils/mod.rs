pub mod password;
pub mod sql;
pub mod time;
pub mod validate;

pub use sql::escape_like_pattern;
pub use time::{from_timestamp, now_timestamp};
