use std::{error::Error, ops::RangeInclusive, time::Duration};

use chrono::Utc;
use clap::{Arg, ArgMatches, Command, value_parser};
use gi_cmus::{Button, Buttons, ClickOutcome, Cmus, CmusConfig, DEFAULT_FORMAT};
use gi_core::{Host, SafeFormatter, Seconds, SystemHost};
use serde::Deserialize;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::{Instant, sleep_until},
};
use tracing::debug;

use crate::commands::{Output, SubCommandExt, parse_colors};

/// From one second to a day.
const TIMEOUT_RANGE: RangeInclusive<Seconds> = 1..=86_400;

/// (id, long flag, what it does, default)
const BUTTON_ARGS: [(&str, &str, &str, Option<&str>); 10] = [
    ("button_pause", "button-pause", "pause/play the playback", Some("1")),
    ("button_stop", "button-stop", "stop the playback", Some("3")),
    ("button_next", "button-next", "skip to the next track", None),
    ("button_previous", "button-previous", "skip to the previous track", None),
    ("button_repeat", "button-repeat", "toggle repeat", None),
    ("button_shuffle", "button-shuffle", "toggle shuffle", None),
    ("button_seek_backward", "button-seek-backward", "seek backward 5 seconds", None),
    ("button_seek_forward", "button-seek-forward", "seek forward 5 seconds", None),
    ("button_volume_down", "button-volume-down", "decrease volume by 5%", None),
    ("button_volume_up", "button-volume-up", "increase volume by 5%", None),
];

pub fn cli() -> Command {
    let command = Command::new("cmus")
        .about("Scripts for cmus info and controls")
        .long_about(
            "Displays the song currently playing in cmus. In --watch mode, click events are \
             read from stdin, either as i3bar/i3blocks json (`{\"button\": 1}`) or as bare \
             button numbers.",
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .default_value(DEFAULT_FORMAT)
                .help("Display format, with placeholders such as {artist}, {title}, {positiontime}"),
        )
        .arg(
            Arg::new("cache_timeout")
                .long("cache-timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(Seconds).range(TIMEOUT_RANGE))
                .default_value("5")
                .help("Refresh interval while cmus is running"),
        )
        .arg(
            Arg::new("sleep_timeout")
                .long("sleep-timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(Seconds).range(TIMEOUT_RANGE))
                .default_value("20")
                .help("Refresh interval while cmus isn't running"),
        )
        .arg(
            Arg::new("color_playing")
                .long("color-playing")
                .value_name("COLOR")
                .help("Color while playing, defaults to --color-good"),
        )
        .arg(
            Arg::new("color_paused")
                .long("color-paused")
                .value_name("COLOR")
                .help("Color while paused, defaults to --color-degraded"),
        )
        .arg(
            Arg::new("color_stopped")
                .long("color-stopped")
                .value_name("COLOR")
                .help("Color while stopped, defaults to --color-bad"),
        )
        .arg(
            Arg::new("click")
                .short('c')
                .long("click")
                .value_name("BUTTON")
                .value_parser(value_parser!(Button))
                .conflicts_with("watch")
                .help("Runs the action bound to BUTTON instead of printing"),
        );

    BUTTON_ARGS
        .iter()
        .fold(command, |command, (id, long, help, default)| {
            let arg = Arg::new(*id)
                .long(*long)
                .value_name("BUTTON")
                .value_parser(value_parser!(Button))
                .help(format!("Mouse button to {help} (0 disables)"));
            command.arg(match default {
                Some(default) => arg.default_value(*default),
                None => arg,
            })
        })
        .common_args()
}

fn parse_button(args: &ArgMatches, id: &str) -> Option<Button> {
    args.get_one::<Button>(id)
        .copied()
        .filter(|button| *button != 0)
}

pub fn parse_config(args: &ArgMatches) -> CmusConfig {
    CmusConfig {
        buttons: Buttons {
            pause: parse_button(args, "button_pause"),
            stop: parse_button(args, "button_stop"),
            next: parse_button(args, "button_next"),
            previous: parse_button(args, "button_previous"),
            repeat: parse_button(args, "button_repeat"),
            shuffle: parse_button(args, "button_shuffle"),
            seek_backward: parse_button(args, "button_seek_backward"),
            seek_forward: parse_button(args, "button_seek_forward"),
            volume_down: parse_button(args, "button_volume_down"),
            volume_up: parse_button(args, "button_volume_up"),
        },
        format: args
            .get_one::<String>("format")
            .expect("has a default value")
            .clone(),
        cache_timeout: *args
            .get_one::<Seconds>("cache_timeout")
            .expect("has a default value"),
        sleep_timeout: *args
            .get_one::<Seconds>("sleep_timeout")
            .expect("has a default value"),
        color_playing: args.get_one::<String>("color_playing").cloned(),
        color_paused: args.get_one::<String>("color_paused").cloned(),
        color_stopped: args.get_one::<String>("color_stopped").cloned(),
    }
}

#[derive(Deserialize)]
struct ClickEvent {
    button: Button,
}

/// Accepts i3bar click events, which come as a json array streamed one
/// element per line, and bare button numbers.
fn parse_click(line: &str) -> Option<Button> {
    let line = line.trim().trim_start_matches(['[', ',']).trim();
    if line.is_empty() {
        return None;
    }
    if let Ok(button) = line.parse::<Button>() {
        return Some(button);
    }
    match serde_json::from_str::<ClickEvent>(line) {
        Ok(event) => Some(event.button),
        Err(err) => {
            debug!(%err, line, "ignoring click event");
            None
        }
    }
}

fn print<H: Host>(cmus: &Cmus<H>, json: bool) -> Result<Instant, gi_core::Error> {
    let request = cmus.cmus();
    Output::new(&request, &SafeFormatter).print(json)?;
    let wait = (request.cached_until - Utc::now())
        .to_std()
        .unwrap_or_default();
    let now = Instant::now();
    Ok(now
        .checked_add(wait)
        .unwrap_or_else(|| now + Duration::from_secs(TIMEOUT_RANGE.end() * 2)))
}

async fn watch<H: Host>(cmus: &Cmus<H>, json: bool) -> Result<(), Box<dyn Error>> {
    let mut clicks = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut deadline = print(cmus, json)?;
    loop {
        tokio::select! {
            _ = sleep_until(deadline) => {
                deadline = print(cmus, json)?;
            }
            line = clicks.next_line(), if stdin_open => match line? {
                Some(line) => {
                    let Some(button) = parse_click(&line) else {
                        continue;
                    };
                    if cmus.on_click(button) == ClickOutcome::Refresh {
                        deadline = print(cmus, json)?;
                    }
                }
                None => {
                    debug!("stdin closed, no more click events");
                    stdin_open = false;
                }
            },
        }
    }
}

pub async fn exec(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let host = SystemHost::new(parse_colors(args));
    let cmus = Cmus::new(host, parse_config(args))?;
    let json = args.get_flag("json");

    if let Some(button) = args.get_one::<Button>("click") {
        cmus.on_click(*button);
        Ok(())
    } else if args.get_flag("watch") {
        watch(&cmus, json).await
    } else {
        print(&cmus, json)?;
        Ok(())
    }
}
