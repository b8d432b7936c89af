use std::fmt::Display;

use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, ArgMatches, Command};
use gi_core::{
    Colors, Formatter,
    host::{COLOR_BAD, COLOR_DEGRADED, COLOR_GOOD},
};
use gi_cmus::RenderRequest;
use serde::Serialize;

pub mod cmus;

pub trait SubCommandExt {
    fn arg_watch(self) -> Self;
    fn arg_json(self) -> Self;
    fn arg_colors(self) -> Self;
    fn common_args(self) -> Self;
}

impl SubCommandExt for Command {
    fn arg_watch(self) -> Self {
        self.arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .action(ArgAction::SetTrue)
                .help("Keeps outputting until killed, reading click events from stdin"),
        )
    }

    fn arg_json(self) -> Self {
        self.arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Formats output into json blocks (full_text, color, cached_until)"),
        )
    }

    fn arg_colors(self) -> Self {
        self.arg(
            Arg::new("color_good")
                .long("color-good")
                .value_name("COLOR")
                .default_value(COLOR_GOOD)
                .help("Bar color for a good state"),
        )
        .arg(
            Arg::new("color_degraded")
                .long("color-degraded")
                .value_name("COLOR")
                .default_value(COLOR_DEGRADED)
                .help("Bar color for a degraded state"),
        )
        .arg(
            Arg::new("color_bad")
                .long("color-bad")
                .value_name("COLOR")
                .default_value(COLOR_BAD)
                .help("Bar color for a bad state"),
        )
    }

    fn common_args(self) -> Self {
        self.arg_watch().arg_json().arg_colors()
    }
}

pub fn parse_colors(args: &ArgMatches) -> Colors {
    let color = |id: &str| {
        args.get_one::<String>(id)
            .expect("has a default value")
            .clone()
    };
    Colors {
        good: color("color_good"),
        degraded: color("color_degraded"),
        bad: color("color_bad"),
    }
}

/// One rendered block, as printed to the bar.
#[derive(Debug, Serialize)]
pub struct Output {
    pub full_text: String,
    pub color: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub cached_until: DateTime<Utc>,
}

impl Output {
    pub fn new(request: &RenderRequest, formatter: &impl Formatter) -> Self {
        Self {
            full_text: formatter.format(&request.format, &request.fields),
            color: request.color.clone(),
            cached_until: request.cached_until,
        }
    }

    pub fn print(&self, json: bool) -> Result<(), gi_core::Error> {
        if json {
            println!("{}", serde_json::to_string(self)?);
        } else {
            println!("{}", self);
        }
        Ok(())
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_text)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use gi_cmus::{PlaybackState, Status};
    use gi_core::{Fields, SafeFormatter, Value};

    use super::*;

    #[test]
    fn output_from_request() {
        let request = RenderRequest {
            format: "{artist} - {title}".to_string(),
            fields: Fields::from_iter([
                ("is_started", Value::Bool(true)),
                ("artist", Value::from("Foo")),
                ("title", Value::from("Bar")),
            ]),
            color: "#00FF00".to_string(),
            cached_until: Utc.timestamp_opt(1_700_000_005, 0).unwrap(),
            state: PlaybackState::Started(Some(Status::Playing)),
        };
        let output = Output::new(&request, &SafeFormatter);

        assert_eq!(output.to_string(), "Foo - Bar");
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r##"{"full_text":"Foo - Bar","color":"#00FF00","cached_until":1700000005}"##
        );
    }

    #[test]
    fn colors_default_to_bar_defaults() {
        let args = Command::new("test")
            .common_args()
            .try_get_matches_from(["test", "--color-bad", "#cc0000"])
            .unwrap();
        assert_eq!(
            parse_colors(&args),
            Colors {
                good: COLOR_GOOD.to_string(),
                degraded: COLOR_DEGRADED.to_string(),
                bad: "#cc0000".to_string(),
            }
        );
    }
}
