use crate::{
    CMUS_REMOTE,
    config::{Button, Buttons},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pause,
    Stop,
    Next,
    Previous,
    Repeat,
    Shuffle,
    SeekBackward,
    SeekForward,
    VolumeDown,
    VolumeUp,
}

impl Action {
    /// In the order bindings are checked when two actions share a button.
    pub const ALL: [Action; 10] = [
        Action::Pause,
        Action::Stop,
        Action::Next,
        Action::Previous,
        Action::Repeat,
        Action::Shuffle,
        Action::SeekBackward,
        Action::SeekForward,
        Action::VolumeDown,
        Action::VolumeUp,
    ];

    pub fn command(self) -> &'static [&'static str] {
        match self {
            Action::Pause => &[CMUS_REMOTE, "--pause"],
            Action::Stop => &[CMUS_REMOTE, "--stop"],
            Action::Next => &[CMUS_REMOTE, "--next"],
            Action::Previous => &[CMUS_REMOTE, "--prev"],
            Action::Repeat => &[CMUS_REMOTE, "--repeat"],
            Action::Shuffle => &[CMUS_REMOTE, "--shuffle"],
            Action::SeekBackward => &[CMUS_REMOTE, "--seek", "-5"],
            Action::SeekForward => &[CMUS_REMOTE, "--seek", "+5"],
            Action::VolumeDown => &[CMUS_REMOTE, "--vol", "-5%"],
            Action::VolumeUp => &[CMUS_REMOTE, "--vol", "+5%"],
        }
    }
}

/// What the bar should do after a click was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Refresh,
    PreventRefresh,
}

impl Buttons {
    pub fn binding(&self, action: Action) -> Option<Button> {
        match action {
            Action::Pause => self.pause,
            Action::Stop => self.stop,
            Action::Next => self.next,
            Action::Previous => self.previous,
            Action::Repeat => self.repeat,
            Action::Shuffle => self.shuffle,
            Action::SeekBackward => self.seek_backward,
            Action::SeekForward => self.seek_forward,
            Action::VolumeDown => self.volume_down,
            Action::VolumeUp => self.volume_up,
        }
    }

    pub fn action_for(&self, button: Button) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| self.binding(*action) == Some(button))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let buttons = Buttons::default();
        assert_eq!(buttons.action_for(1), Some(Action::Pause));
        assert_eq!(buttons.action_for(3), Some(Action::Stop));
        assert_eq!(buttons.action_for(2), None);
        assert_eq!(buttons.action_for(4), None);
    }

    #[test]
    fn earlier_action_wins_shared_button() {
        let buttons = Buttons {
            pause: None,
            next: Some(4),
            volume_up: Some(4),
            shuffle: Some(2),
            seek_forward: Some(2),
            ..Buttons::default()
        };
        assert_eq!(buttons.action_for(4), Some(Action::Next));
        assert_eq!(buttons.action_for(2), Some(Action::Shuffle));
        assert_eq!(buttons.action_for(1), None);
    }

    #[test]
    fn commands() {
        assert_eq!(Action::Previous.command(), ["cmus-remote", "--prev"]);
        assert_eq!(Action::SeekBackward.command(), ["cmus-remote", "--seek", "-5"]);
        assert_eq!(Action::VolumeUp.command(), ["cmus-remote", "--vol", "+5%"]);
    }
}
