use gi_core::{Fields, Seconds, seconds_to_time};
use tracing::debug;

/// Turns `cmus-remote --query` output into `(key, value)` pairs.
///
/// Lines are either `<category> <value>` or `set|tag <key> <value>`. A key
/// seen twice keeps its first position and its last value.
pub fn organize_data(data: &str) -> Vec<(String, String)> {
    let mut organized: Vec<(String, String)> = Vec::new();
    for line in data.lines().filter(|line| !line.is_empty()) {
        let (category, value) = line.split_once(' ').unwrap_or((line, ""));
        let (key, value) = match category {
            "set" | "tag" => value.split_once(' ').unwrap_or((value, "")),
            _ => (category, value),
        };

        match organized.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => organized.push((key.to_string(), value.to_string())),
        }
    }
    organized
}

/// Adds `durationtime`/`positiontime`, turns cmus' boolean tokens into
/// booleans and marks streams.
pub fn manipulate_data(data: Vec<(String, String)>) -> Fields {
    let mut fields = Fields::new();
    for (key, value) in data {
        match (key.as_str(), value.as_str()) {
            ("duration" | "position", _) => {
                match value.trim().parse::<Seconds>() {
                    Ok(seconds) => {
                        fields.insert(format!("{key}time"), seconds_to_time(seconds));
                    }
                    Err(err) => {
                        debug!(%key, %value, %err, "not a number of seconds");
                    }
                }
                fields.insert(key, value);
            }
            (_, "true" | "enabled") => fields.insert(key, true),
            (_, "false" | "disabled") => fields.insert(key, false),
            _ => fields.insert(key, value),
        }
    }

    // cmus only reports `stream` while playing one, whatever its value
    if fields.contains_key("stream") {
        fields.insert("stream", true);
    }

    fields
}

#[cfg(test)]
mod tests {
    use gi_core::Value;

    use super::*;

    fn pairs(data: &[(&str, &str)]) -> Vec<(String, String)> {
        data.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn organizes_all_line_shapes() {
        let data = "status playing\n\
                    file /home/user/Music/big war.flac\n\
                    duration 171\n\
                    tag artist Music For Programming\n\
                    tag title Big War\n\
                    set aaa_mode all\n\
                    set replaygain disabled\n";
        assert_eq!(
            organize_data(data),
            pairs(&[
                ("status", "playing"),
                ("file", "/home/user/Music/big war.flac"),
                ("duration", "171"),
                ("artist", "Music For Programming"),
                ("title", "Big War"),
                ("aaa_mode", "all"),
                ("replaygain", "disabled"),
            ])
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let data = "set title One\ntag title Two\nstatus paused\nstatus stopped";
        assert_eq!(
            organize_data(data),
            pairs(&[("title", "Two"), ("status", "stopped")])
        );
    }

    #[test]
    fn lines_without_value() {
        assert_eq!(
            organize_data("stream\ntag comment\nset\n\n"),
            pairs(&[("stream", ""), ("comment", ""), ("", "")])
        );
    }

    #[test]
    fn adds_time_keys() {
        let fields = manipulate_data(pairs(&[("duration", "3661"), ("position", "17")]));
        assert_eq!(fields.get("durationtime"), Some(&Value::from("1:01:01")));
        assert_eq!(fields.get("duration"), Some(&Value::from("3661")));
        assert_eq!(fields.get("positiontime"), Some(&Value::from("0:17")));
        assert_eq!(fields.get("position"), Some(&Value::from("17")));
    }

    #[test]
    fn keeps_unparsable_durations() {
        let fields = manipulate_data(pairs(&[("duration", "-1"), ("position", "")]));
        assert_eq!(fields.get("duration"), Some(&Value::from("-1")));
        assert_eq!(fields.get("position"), Some(&Value::from("")));
        assert!(!fields.contains_key("durationtime"));
        assert!(!fields.contains_key("positiontime"));
    }

    #[test]
    fn normalizes_boolean_tokens() {
        let fields = manipulate_data(pairs(&[
            ("repeat", "true"),
            ("softvol", "enabled"),
            ("shuffle", "false"),
            ("replaygain", "disabled"),
            ("aaa_mode", "album"),
            ("title", "True"),
        ]));
        assert_eq!(fields.get("repeat"), Some(&Value::Bool(true)));
        assert_eq!(fields.get("softvol"), Some(&Value::Bool(true)));
        assert_eq!(fields.get("shuffle"), Some(&Value::Bool(false)));
        assert_eq!(fields.get("replaygain"), Some(&Value::Bool(false)));
        assert_eq!(fields.get("aaa_mode"), Some(&Value::from("album")));
        assert_eq!(fields.get("title"), Some(&Value::from("True")));
    }

    #[test]
    fn stream_presence_means_true() {
        let fields = manipulate_data(pairs(&[("stream", "false")]));
        assert_eq!(fields.get("stream"), Some(&Value::Bool(true)));

        let fields = manipulate_data(pairs(&[("stream", "http://radio.example/live")]));
        assert_eq!(fields.get("stream"), Some(&Value::Bool(true)));

        assert!(!manipulate_data(pairs(&[("status", "playing")])).contains_key("stream"));
    }
}
