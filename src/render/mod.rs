//! Template rendering facade.

pub mod parser;

use crate::song::Songs;

/// Render `format` against the current/next song pair.
pub fn render_songs(format: &str, songs: &Songs) -> (String, bool) {
    parser::render(format, |field| Some(songs.resolve(field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Song;
    use chrono::Locale;

    #[test]
    fn next_prefix_reads_following_song() {
        let songs = Songs::new(
            Song::from_pairs([("title", "Now"), ("file", "now.flac")]),
            Song::from_pairs([("file", "next.flac")]),
            Locale::POSIX,
        );
        let (text, found) = render_songs("[%title%|%file%] → [%next_title%|%next_file%]", &songs);
        assert_eq!(text, "Now → next.flac");
        assert!(found);
    }

    #[test]
    fn default_format_falls_back_to_file() {
        let mut songs = Songs::new(
            Song::from_pairs([("file", "track.ogg")]),
            Song::default(),
            Locale::POSIX,
        );
        songs.set_state("[play]");
        let (text, _) = render_songs("%state% [[[%artist%] - %title%]|[%file%]]", &songs);
        assert_eq!(text, "[play] track.ogg");
    }

    #[test]
    fn default_format_with_tags() {
        let mut songs = Songs::new(
            Song::from_pairs([("artist", "A"), ("title", "T"), ("file", "f")]),
            Song::default(),
            Locale::POSIX,
        );
        songs.set_state("[pause]");
        let (text, _) = render_songs("%state% [[[%artist%] - %title%]|[%file%]]", &songs);
        assert_eq!(text, "[pause] A - T");
    }
}
