//! Display the song currently playing in cmus, and control it with clicks.
//!
//! Everything is read from `cmus-remote --query`. The placeholders available
//! to the format are whatever cmus reports (`artist`, `title`, `album`,
//! `status`, `duration`, `vol_left`, `shuffle`, ...) plus:
//!
//! - `is_started`, `is_playing`, `is_paused`, `is_stopped`
//! - `durationtime`, `positiontime`: `duration`/`position` as `[H:]M:SS`
//! - `follow`, only queried when the format mentions it

use std::str::FromStr;

use chrono::{DateTime, Utc};
use gi_core::{Error, Fields, Host, Value};
use tracing::{debug, info};

pub mod click;
pub mod config;
pub mod data;

pub use click::{Action, ClickOutcome};
pub use config::{Button, Buttons, CmusConfig, DEFAULT_FORMAT};
use data::{manipulate_data, organize_data};

pub const CMUS_REMOTE: &str = "cmus-remote";

const FOLLOW_PLACEHOLDERS: [&str; 3] = ["if=follow", "if=!follow", "{follow}"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
    Stopped,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Self::Playing),
            "paused" => Ok(Self::Paused),
            "stopped" => Ok(Self::Stopped),
            _ => Err(format!("Invalid cmus status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    NotStarted,
    /// `None` when cmus reported a status we don't know about.
    Started(Option<Status>),
}

impl PlaybackState {
    pub fn is_started(&self) -> bool {
        matches!(self, PlaybackState::Started(_))
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            PlaybackState::Started(status) => *status,
            PlaybackState::NotStarted => None,
        }
    }

    fn to_fields(self) -> Fields {
        let status = self.status();
        Fields::from_iter([
            ("is_paused", status == Some(Status::Paused)),
            ("is_playing", status == Some(Status::Playing)),
            ("is_started", self.is_started()),
            ("is_stopped", status == Some(Status::Stopped)),
        ])
    }
}

/// Everything the bar needs to draw the module: the format and what to fill
/// it with, the color, and until when this stays valid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub format: String,
    pub fields: Fields,
    pub color: String,
    pub cached_until: DateTime<Utc>,
    pub state: PlaybackState,
}

#[derive(Debug)]
struct StatusColors {
    playing: String,
    paused: String,
    stopped: String,
    bad: String,
}

pub struct Cmus<H: Host> {
    host: H,
    config: CmusConfig,
    colors: StatusColors,
    use_follow: bool,
}

impl<H: Host> Cmus<H> {
    pub fn new(host: H, config: CmusConfig) -> Result<Self, Error> {
        if !host.check_commands(&[CMUS_REMOTE]) {
            return Err(Error::CommandNotInstalled {
                command: CMUS_REMOTE.to_string(),
            });
        }

        let defaults = host.colors();
        let colors = StatusColors {
            playing: config
                .color_playing
                .clone()
                .unwrap_or_else(|| defaults.good.clone()),
            paused: config
                .color_paused
                .clone()
                .unwrap_or_else(|| defaults.degraded.clone()),
            stopped: config
                .color_stopped
                .clone()
                .unwrap_or_else(|| defaults.bad.clone()),
            bad: defaults.bad.clone(),
        };

        // `follow` isn't part of `--query` output, it has to be asked for separately
        let use_follow = FOLLOW_PLACEHOLDERS
            .iter()
            .any(|placeholder| config.format.contains(placeholder));
        info!(use_follow, "cmus module ready");

        Ok(Self {
            host,
            config,
            colors,
            use_follow,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &CmusConfig {
        &self.config
    }

    pub fn uses_follow(&self) -> bool {
        self.use_follow
    }

    /// `None` when cmus isn't running.
    fn get_cmus_data(&self) -> Option<String> {
        match self.host.command_output(&[CMUS_REMOTE, "--query"]) {
            Ok(data) => Some(data),
            Err(err) => {
                debug!(%err, "cmus isn't running");
                None
            }
        }
    }

    fn get_follow(&self) -> bool {
        match self.host.command_output(&[CMUS_REMOTE, "--raw", "set follow"]) {
            Ok(output) => output.contains("true"),
            Err(err) => {
                debug!(%err, "couldn't get follow");
                false
            }
        }
    }

    /// Polls cmus once.
    pub fn cmus(&self) -> RenderRequest {
        let (state, data) = match self.get_cmus_data() {
            Some(raw) => {
                let mut data = manipulate_data(organize_data(&raw));
                if self.use_follow {
                    data.insert("follow", self.get_follow());
                }
                let status = data
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(|status| status.parse::<Status>().ok());
                (PlaybackState::Started(status), data)
            }
            None => (PlaybackState::NotStarted, Fields::new()),
        };

        let color = match state.status() {
            Some(Status::Playing) => &self.colors.playing,
            Some(Status::Paused) => &self.colors.paused,
            Some(Status::Stopped) => &self.colors.stopped,
            None => &self.colors.bad,
        };
        let cached_until = if state.is_started() {
            self.config.cache_timeout
        } else {
            self.config.sleep_timeout
        };

        // the state flags always win over whatever cmus reported
        let mut fields = data;
        fields.extend(state.to_fields());

        RenderRequest {
            format: self.config.format.clone(),
            fields,
            color: color.clone(),
            cached_until: self.host.time_in(cached_until),
            state,
        }
    }

    /// Runs the action bound to `button`, if any. Failures (e.g. seeking while
    /// stopped) are only logged.
    pub fn on_click(&self, button: Button) -> ClickOutcome {
        match self.config.buttons.action_for(button) {
            Some(action) => {
                debug!(button, ?action, "cmus click");
                if let Err(err) = self.host.command_run(action.command()) {
                    debug!(%err, ?action, "cmus action failed");
                }
                ClickOutcome::Refresh
            }
            None => ClickOutcome::PreventRefresh,
        }
    }
}
