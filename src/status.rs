//! Turn a player snapshot into the final status text and color.

use crate::{
    config::Config,
    render::render_songs,
    song::{Snapshot, Songs},
};
use chrono::Locale;

/// Shown instead of a render when the song data cannot be obtained.
pub const READ_FAILURE_TEXT: &str = "Failed to read song data!";

const ELLIPSIS: &str = "...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Play,
    Pause,
    Stop,
    Unknown,
}

impl PlayState {
    pub fn from_mpd(state: &str) -> Self {
        match state {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            _ => Self::Unknown,
        }
    }

    pub fn label(self, cfg: &Config) -> &str {
        match self {
            Self::Play => &cfg.state_play,
            Self::Pause => &cfg.state_pause,
            Self::Stop => &cfg.state_stop,
            Self::Unknown => "?",
        }
    }

    fn color(self, cfg: &Config) -> Option<&str> {
        match self {
            Self::Play => Some(&cfg.color_play),
            Self::Pause => Some(&cfg.color_pause),
            Self::Stop => Some(&cfg.color_stop),
            Self::Unknown => None,
        }
    }

    fn hidden(self, cfg: &Config) -> bool {
        match self {
            Self::Pause => cfg.hide_when_paused,
            Self::Stop => cfg.hide_when_stopped,
            Self::Play | Self::Unknown => false,
        }
    }
}

/// What the status bar should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub color: Option<String>,
}

/// Bind the snapshot's songs together with the injected `state` label.
pub fn songs_for(snapshot: Snapshot, cfg: &Config, locale: Locale) -> Songs {
    let label = PlayState::from_mpd(&snapshot.state).label(cfg).to_owned();
    let mut songs = Songs::new(snapshot.current, snapshot.next, locale);
    songs.set_state(&label);
    songs
}

/// Render, hide and truncate according to `cfg`.
pub fn compose(snapshot: Snapshot, cfg: &Config, locale: Locale) -> Status {
    let state = PlayState::from_mpd(&snapshot.state);

    let text = if state.hidden(cfg) {
        String::new()
    } else {
        let songs = songs_for(snapshot, cfg, locale);
        render_songs(&cfg.format, &songs).0
    };

    Status {
        text: truncate(&text, cfg.max_width),
        color: cfg
            .color
            .then(|| state.color(cfg))
            .flatten()
            .map(str::to_owned),
    }
}

/// Status used when the snapshot could not be read.
pub fn failure(cfg: &Config) -> Status {
    Status {
        text: truncate(READ_FAILURE_TEXT, cfg.max_width),
        color: None,
    }
}

/// Cut `text` to at most `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    if max < ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}
