use std::fmt::Display;

use thiserror::Error;

pub mod format;
pub mod host;
pub mod value;

pub use format::{Formatter, SafeFormatter};
pub use host::{Colors, Host, SystemHost};
pub use value::{Fields, Value};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Command \"{}\" isn't installed", .command)]
    CommandNotInstalled { command: String },

    #[error("Command \"{}\" exited with {}: {}", .command, .status, .stderr)]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Cannot run an empty command")]
    EmptyCommand,
}

pub type Seconds = u64;

/// Elapsed time split into its components. Displays as `[H:]M:SS`, the hour
/// component only showing up once it is non-zero.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Timestamp {
    hours: u64,
    minutes: u8,
    seconds: u8,
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hours > 0 {
            write!(
                f,
                "{}:{:0>2}:{:0>2}",
                self.hours, self.minutes, self.seconds
            )
        } else {
            write!(f, "{}:{:0>2}", self.minutes, self.seconds)
        }
    }
}

pub trait AsTimestamp {
    fn as_timestamp(&self) -> Timestamp;
}

impl AsTimestamp for Seconds {
    fn as_timestamp(&self) -> Timestamp {
        let hours = self / 3600;
        let minutes = self / 60 % 60;
        let seconds = self % 60;

        Timestamp {
            hours,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }
}

/// `171` -> `2:51`, `3661` -> `1:01:01`
pub fn seconds_to_time(value: Seconds) -> String {
    value.as_timestamp().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_to_time_omits_zero_hours() {
        assert_eq!(seconds_to_time(0), "0:00");
        assert_eq!(seconds_to_time(17), "0:17");
        assert_eq!(seconds_to_time(171), "2:51");
        assert_eq!(seconds_to_time(3599), "59:59");
    }

    #[test]
    fn seconds_to_time_keeps_padding_with_hours() {
        assert_eq!(seconds_to_time(3600), "1:00:00");
        assert_eq!(seconds_to_time(3661), "1:01:01");
        assert_eq!(seconds_to_time(36_000), "10:00:00");
    }

    #[test]
    fn as_timestamp_splits_components() {
        assert_eq!(
            7384_u64.as_timestamp(),
            Timestamp {
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
    }
}
