use anyhow::{Context, Result};
use chrono::Locale;
use std::path::PathBuf;

/// Immutable bag of paths and environment-derived settings used throughout
/// the app. Constructed once at startup; never mutated after that.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub config_file: PathBuf,
    pub last_text_file: PathBuf,
    pub locale: Locale,
}

impl Ctx {
    /// Construct paths and the time locale from environment variables.
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME").context("$HOME is not set")?;

        let config_dir = xdg_dir("XDG_CONFIG_HOME", &home, ".config").join("mpdline");
        let cache_dir = xdg_dir("XDG_CACHE_HOME", &home, ".cache").join("mpdline");

        Ok(Self {
            config_file: config_dir.join("config.toml"),
            last_text_file: cache_dir.join("last"),
            locale: locale_from_env(),
        })
    }
}

fn xdg_dir(var: &str, home: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|s| !s.is_empty())
        .map_or_else(|| PathBuf::from(home).join(fallback), PathBuf::from)
}

/// Time locale from `LC_ALL`, `LC_TIME`, then `LANG`; `POSIX` if unset or unknown.
fn locale_from_env() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .and_then(|v| parse_locale(&v))
        .unwrap_or(Locale::POSIX)
}

/// Parse `de_DE.UTF-8@euro` style names into a [`Locale`].
fn parse_locale(raw: &str) -> Option<Locale> {
    let name = raw.split(['.', '@']).next()?;
    match name {
        "C" | "POSIX" => Some(Locale::POSIX),
        _ => Locale::try_from(name).ok(),
    }
}
