use std::{env, path::Path, process::Command};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::{Error, Seconds};

pub const COLOR_GOOD: &str = "#00FF00";
pub const COLOR_DEGRADED: &str = "#FFFF00";
pub const COLOR_BAD: &str = "#FF0000";

/// Default colors of the bar, used by modules that have no override configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub good: String,
    pub degraded: String,
    pub bad: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            good: COLOR_GOOD.to_string(),
            degraded: COLOR_DEGRADED.to_string(),
            bad: COLOR_BAD.to_string(),
        }
    }
}

/// What a module gets to use from the bar running it.
pub trait Host {
    /// Runs `command` and returns its stdout. Fails on spawn errors and on a
    /// non-zero exit status.
    fn command_output(&self, command: &[&str]) -> Result<String, Error>;

    /// Runs `command` to completion, discarding its output.
    fn command_run(&self, command: &[&str]) -> Result<(), Error>;

    /// Whether every one of `commands` can be found in `PATH`.
    fn check_commands(&self, commands: &[&str]) -> bool;

    fn time_in(&self, seconds: Seconds) -> DateTime<Utc>;

    fn colors(&self) -> &Colors;
}

#[derive(Debug, Default)]
pub struct SystemHost {
    colors: Colors,
}

impl SystemHost {
    pub fn new(colors: Colors) -> Self {
        Self { colors }
    }

    fn spawn(command: &[&str]) -> Result<std::process::Output, Error> {
        let (program, args) = command.split_first().ok_or(Error::EmptyCommand)?;
        debug!(command = %command.join(" "), "running command");
        let output = Command::new(program).args(args).output()?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(Error::CommandFailed {
                command: command.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Host for SystemHost {
    fn command_output(&self, command: &[&str]) -> Result<String, Error> {
        let output = Self::spawn(command)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn command_run(&self, command: &[&str]) -> Result<(), Error> {
        Self::spawn(command).map(|_| ())
    }

    fn check_commands(&self, commands: &[&str]) -> bool {
        commands.iter().all(|command| is_in_path(command))
    }

    /// Saturates at the latest representable time.
    fn time_in(&self, seconds: Seconds) -> DateTime<Utc> {
        let now = Utc::now();
        i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn colors(&self) -> &Colors {
        &self.colors
    }
}

fn is_in_path(command: &str) -> bool {
    if command.contains('/') {
        return Path::new(command).is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        let host = SystemHost::default();
        assert!(matches!(host.command_output(&[]), Err(Error::EmptyCommand)));
        assert!(matches!(host.command_run(&[]), Err(Error::EmptyCommand)));
    }

    #[test]
    fn missing_command_is_not_found() {
        let host = SystemHost::default();
        assert!(!host.check_commands(&["getinfo-surely-not-a-real-command"]));
        assert!(host.command_output(&["getinfo-surely-not-a-real-command"]).is_err());
    }

    #[test]
    fn time_in_is_in_the_future() {
        let host = SystemHost::default();
        let now = Utc::now();
        let until = host.time_in(5);
        assert!(until >= now + TimeDelta::seconds(5));
        assert!(until < now + TimeDelta::seconds(60));
    }

    #[test]
    fn time_in_saturates_instead_of_overflowing() {
        let host = SystemHost::default();
        let now = Utc::now();
        assert_eq!(host.time_in(100_000_000_000_000_000), DateTime::<Utc>::MAX_UTC);
        assert_eq!(host.time_in(u64::MAX), DateTime::<Utc>::MAX_UTC);
        assert!(host.time_in(i64::MAX as u64) > now);
    }
}
