use chrono::Local;
use serde::{ Serialize, Deserialize };

/// Format of the server-assigned `time` field, local time.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    pub user: String,
    pub time: String,
}

impl Message {
    /// Builds a message stamped with the current local time.
    pub fn new(message: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user: user.into(),
            time: Local::now().format(TIME_FORMAT).to_string(),
        }
    }
}
