//! Song records, attribute formatting, and the snapshot that feeds them.

use anyhow::{Context, Result};
use chrono::{Locale, NaiveDateTime};
use std::collections::HashMap;

/// Field prefix selecting the next song instead of the current one.
const NEXT_PREFIX: &str = "next_";

/// Timestamp layout of mpd's `last-modified` field.
const MTIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One track's raw metadata, as reported by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Song {
    fields: HashMap<String, String>,
}

impl Song {
    #[cfg(test)]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Build a song from a TOML table, keeping scalar values only.
    fn from_table(table: &toml::Table) -> Self {
        Self {
            fields: table
                .iter()
                .filter_map(|(k, v)| scalar_text(v).map(|s| (k.clone(), s)))
                .collect(),
        }
    }
}

/// Format `attr` of `song` for display. Missing or malformed data gives `""`.
pub fn song_attr(song: &Song, attr: &str, locale: Locale) -> String {
    match attr {
        "time" => song
            .get("time")
            .and_then(|t| t.trim().parse::<i64>().ok())
            .filter(|&secs| secs > 0)
            .map(|secs| format!("{}:{:02}", secs / 60, secs % 60))
            .unwrap_or_default(),
        "position" => song
            .get("pos")
            .and_then(|p| p.trim().parse::<i128>().ok())
            .and_then(|pos| pos.checked_add(1))
            .map(|pos| pos.to_string())
            .unwrap_or_default(),
        "mtime" => format_mtime(song, "%c", locale),
        "mdate" => format_mtime(song, "%x", locale),
        other => song.get(other).unwrap_or_default().to_owned(),
    }
}

fn format_mtime(song: &Song, fmt: &str, locale: Locale) -> String {
    song.get("last-modified")
        .and_then(|raw| NaiveDateTime::parse_from_str(raw.trim(), MTIME_FORMAT).ok())
        .map(|dt| dt.and_utc().format_localized(fmt, locale).to_string())
        .unwrap_or_default()
}

/// The current and next songs of one render, plus the time locale.
#[derive(Clone, Debug)]
pub struct Songs {
    pub current: Song,
    pub next: Song,
    pub locale: Locale,
}

impl Songs {
    pub fn new(current: Song, next: Song, locale: Locale) -> Self {
        Self {
            current,
            next,
            locale,
        }
    }

    /// Resolve a template field; `next_foo` reads `foo` of the next song.
    pub fn resolve(&self, field: &str) -> String {
        match field.strip_prefix(NEXT_PREFIX) {
            Some(attr) => song_attr(&self.next, attr, self.locale),
            None => song_attr(&self.current, field, self.locale),
        }
    }

    /// Expose the state label as `%state%` on both songs.
    pub fn set_state(&mut self, label: &str) {
        self.current.insert("state", label);
        self.next.insert("state", label);
    }
}

/// Player status plus the two songs it points at.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub state: String,
    pub current: Song,
    pub next: Song,
}

impl Snapshot {
    /// Parse a snapshot document (`[status]` table and `[[playlist]]` array).
    pub fn parse(src: &str) -> Result<Self> {
        let doc: toml::Table = toml::from_str(src).context("parse snapshot")?;

        let status = doc.get("status").and_then(toml::Value::as_table);
        let state = status
            .and_then(|s| s.get("state"))
            .and_then(toml::Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let index = |key: &str| {
            status
                .and_then(|s| s.get(key))
                .and_then(toml::Value::as_integer)
                .unwrap_or(0)
        };

        let playlist = doc
            .get("playlist")
            .and_then(toml::Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let song_at = |idx: i64| {
            usize::try_from(idx)
                .ok()
                .and_then(|i| playlist.get(i))
                .and_then(toml::Value::as_table)
                .map(Song::from_table)
                .unwrap_or_default()
        };

        Ok(Self {
            state,
            current: song_at(index("song")),
            next: song_at(index("nextsong")),
        })
    }
}

/// Render a scalar TOML value as text; tables, arrays and datetimes yield `None`.
fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(pairs: &[(&str, &str)], field: &str) -> String {
        song_attr(&Song::from_pairs(pairs.iter().copied()), field, Locale::POSIX)
    }

    #[test]
    fn time_is_minutes_and_seconds() {
        assert_eq!(attr(&[("time", "125")], "time"), "2:05");
        assert_eq!(attr(&[("time", "59")], "time"), "0:59");
        assert_eq!(attr(&[("time", "3600")], "time"), "60:00");
    }

    #[test]
    fn time_rejects_zero_negative_and_garbage() {
        assert_eq!(attr(&[("time", "0")], "time"), "");
        assert_eq!(attr(&[("time", "-4")], "time"), "");
        assert_eq!(attr(&[("time", "abc")], "time"), "");
        assert_eq!(attr(&[], "time"), "");
    }

    #[test]
    fn position_is_one_based() {
        assert_eq!(attr(&[("pos", "0")], "position"), "1");
        assert_eq!(attr(&[("pos", "4")], "position"), "5");
        assert_eq!(attr(&[("pos", "x")], "position"), "");
        assert_eq!(attr(&[], "position"), "");
    }

    #[test]
    fn position_handles_huge_indices() {
        assert_eq!(
            attr(&[("pos", "9223372036854775807")], "position"),
            "9223372036854775808"
        );
        let max = i128::MAX.to_string();
        assert_eq!(attr(&[("pos", max.as_str())], "position"), "");
    }

    #[test]
    fn raw_pos_field_is_untouched() {
        assert_eq!(attr(&[("pos", "4")], "pos"), "4");
    }

    #[test]
    fn mtime_and_mdate_use_locale_formats() {
        let song = [("last-modified", "2015-03-01T18:04:11Z")];
        assert_eq!(attr(&song, "mdate"), "03/01/15");
        assert!(attr(&song, "mtime").contains("18:04:11"));
    }

    #[test]
    fn mtime_tolerates_bad_input() {
        assert_eq!(attr(&[("last-modified", "yesterday")], "mtime"), "");
        assert_eq!(attr(&[], "mdate"), "");
    }

    #[test]
    fn other_fields_are_raw() {
        assert_eq!(attr(&[("artist", "A")], "artist"), "A");
        assert_eq!(attr(&[], "artist"), "");
    }

    #[test]
    fn next_prefix_selects_next_song() {
        let songs = Songs::new(
            Song::from_pairs([("title", "cur"), ("time", "61")]),
            Song::from_pairs([("title", "nxt"), ("time", "5")]),
            Locale::POSIX,
        );
        assert_eq!(songs.resolve("title"), "cur");
        assert_eq!(songs.resolve("next_title"), "nxt");
        assert_eq!(songs.resolve("next_time"), "0:05");
        assert_eq!(songs.resolve("time"), "1:01");
    }

    #[test]
    fn state_is_injected_into_both_songs() {
        let mut songs = Songs::new(Song::default(), Song::default(), Locale::POSIX);
        songs.set_state("[play]");
        assert_eq!(songs.resolve("state"), "[play]");
        assert_eq!(songs.resolve("next_state"), "[play]");
    }

    #[test]
    fn snapshot_picks_current_and_next() {
        let snap = Snapshot::parse(
            r#"
            [status]
            state = "play"
            song = 1
            nextsong = 0

            [[playlist]]
            file = "a.flac"
            time = 200

            [[playlist]]
            file = "b.flac"
            title = "B"
            "#,
        )
        .unwrap();
        assert_eq!(snap.state, "play");
        assert_eq!(snap.current.get("title"), Some("B"));
        assert_eq!(snap.next.get("time"), Some("200"));
    }

    #[test]
    fn snapshot_out_of_range_index_is_empty_song() {
        let snap = Snapshot::parse(
            r#"
            [status]
            state = "stop"
            nextsong = 7

            [[playlist]]
            file = "only.flac"
            "#,
        )
        .unwrap();
        assert_eq!(snap.current.get("file"), Some("only.flac"));
        assert_eq!(snap.next, Song::default());
    }

    #[test]
    fn snapshot_without_status_is_unknown() {
        let snap = Snapshot::parse("").unwrap();
        assert_eq!(snap.state, "");
        assert_eq!(snap.current, Song::default());
    }

    #[test]
    fn snapshot_rejects_invalid_toml() {
        assert!(Snapshot::parse("[status").is_err());
    }
}
