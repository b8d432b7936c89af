use gi_core::Seconds;

/// Mouse button number as reported by the bar (1 = left, 2 = middle, 3 = right,
/// 4/5 = scroll up/down).
pub type Button = u8;

pub const DEFAULT_FORMAT: &str = concat!(
    r"[\?if=is_started [\?if=is_playing > ][\?if=is_paused \|\| ]",
    r"[\?if=is_stopped .. ][[{artist}][\?soft  - ][{title}]",
    r"|\?show cmus: waiting for user input]]",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buttons {
    pub pause: Option<Button>,
    pub stop: Option<Button>,
    pub next: Option<Button>,
    pub previous: Option<Button>,
    pub repeat: Option<Button>,
    pub shuffle: Option<Button>,
    pub seek_backward: Option<Button>,
    pub seek_forward: Option<Button>,
    pub volume_down: Option<Button>,
    pub volume_up: Option<Button>,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            pause: Some(1),
            stop: Some(3),
            next: None,
            previous: None,
            repeat: None,
            shuffle: None,
            seek_backward: None,
            seek_forward: None,
            volume_down: None,
            volume_up: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmusConfig {
    pub buttons: Buttons,
    pub format: String,
    /// Refresh interval while cmus is running.
    pub cache_timeout: Seconds,
    /// Refresh interval while cmus isn't running.
    pub sleep_timeout: Seconds,
    /// Defaults to the bar's good color.
    pub color_playing: Option<String>,
    /// Defaults to the bar's degraded color.
    pub color_paused: Option<String>,
    /// Defaults to the bar's bad color.
    pub color_stopped: Option<String>,
}

impl Default for CmusConfig {
    fn default() -> Self {
        Self {
            buttons: Buttons::default(),
            format: DEFAULT_FORMAT.to_string(),
            cache_timeout: 5,
            sleep_timeout: 20,
            color_playing: None,
            color_paused: None,
            color_stopped: None,
        }
    }
}
