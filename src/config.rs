//! User options — everything we know about how to present the status line.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

pub const DEFAULT_FORMAT: &str = "%state% [[[%artist%] - %title%]|[%file%]]";

/// Fully-resolved configuration with defaults applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub format: String,
    pub hide_when_paused: bool,
    pub hide_when_stopped: bool,
    pub max_width: usize,
    pub state_play: String,
    pub state_pause: String,
    pub state_stop: String,
    pub color: bool,
    pub color_play: String,
    pub color_pause: String,
    pub color_stop: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_owned(),
            hide_when_paused: false,
            hide_when_stopped: true,
            max_width: 120,
            state_play: "[play]".to_owned(),
            state_pause: "[pause]".to_owned(),
            state_stop: "[stop]".to_owned(),
            color: false,
            color_play: "#00FF00".to_owned(),
            color_pause: "#FFFF00".to_owned(),
            color_stop: "#FF0000".to_owned(),
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(src) => Self::parse(&src).with_context(|| format!("load {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    /// Overlay the keys present in a TOML document onto the defaults.
    pub fn parse(src: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(src).context("parse config.toml")?;
        let mut cfg = Self::default();

        for (key, value) in &table {
            match key.as_str() {
                "format" => cfg.format = string(key, value)?,
                "hide_when_paused" => cfg.hide_when_paused = boolean(key, value)?,
                "hide_when_stopped" => cfg.hide_when_stopped = boolean(key, value)?,
                "max_width" => cfg.max_width = width(key, value)?,
                "state_play" => cfg.state_play = string(key, value)?,
                "state_pause" => cfg.state_pause = string(key, value)?,
                "state_stop" => cfg.state_stop = string(key, value)?,
                "color" => cfg.color = boolean(key, value)?,
                "color_play" => cfg.color_play = string(key, value)?,
                "color_pause" => cfg.color_pause = string(key, value)?,
                "color_stop" => cfg.color_stop = string(key, value)?,
                // Unknown keys are ignored.
                _ => {}
            }
        }

        Ok(cfg)
    }
}

fn string(key: &str, value: &toml::Value) -> Result<String> {
    match value.as_str() {
        Some(s) => Ok(s.to_owned()),
        None => bail!("'{key}' must be a string, got {}", value.type_str()),
    }
}

fn boolean(key: &str, value: &toml::Value) -> Result<bool> {
    match value.as_bool() {
        Some(b) => Ok(b),
        None => bail!("'{key}' must be a boolean, got {}", value.type_str()),
    }
}

fn width(key: &str, value: &toml::Value) -> Result<usize> {
    let Some(n) = value.as_integer() else {
        bail!("'{key}' must be an integer, got {}", value.type_str());
    };
    usize::try_from(n).with_context(|| format!("'{key}' must not be negative"))
}
