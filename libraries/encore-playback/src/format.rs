//! Display helpers for playback controls

use encore_core::Track;
use std::borrow::Cow;
use std::time::Duration;

/// Titles longer than this many characters are truncated
pub const TITLE_MAX_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

/// Format a position or duration as `MM:SS`
///
/// Fractional seconds are dropped. Minutes keep counting past 99.
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Shorten a title to [`TITLE_MAX_CHARS`] characters plus an ellipsis
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &title[..cut], ELLIPSIS)),
        None => Cow::Borrowed(title),
    }
}

/// Cover image for a track, sized for the player
///
/// Uses the track artwork, falling back to the uploader's avatar. The
/// provider's `large` size token is swapped for `t300x300`.
pub fn cover_art_url(track: &Track) -> Option<String> {
    track
        .artwork_url
        .as_deref()
        .or(track.user.avatar_url.as_deref())
        .map(|url| url.replacen("large", "t300x300", 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::User;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_secs(65)), "01:05");
        assert_eq!(format_time(Duration::from_secs(599)), "09:59");
        assert_eq!(format_time(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn drops_fractional_seconds() {
        assert_eq!(format_time(Duration::from_secs_f64(59.999)), "00:59");
    }

    #[test]
    fn long_durations_keep_counting_minutes() {
        assert_eq!(format_time(Duration::from_secs(100 * 60 + 1)), "100:01");
    }

    #[test]
    fn truncates_titles_over_limit() {
        let exact = "a".repeat(40);
        let over = format!("{}b", "a".repeat(40));

        assert_eq!(truncate_title(&exact), exact);
        assert!(matches!(truncate_title(&exact), Cow::Borrowed(_)));
        assert_eq!(truncate_title(&over), format!("{}...", exact));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "é".repeat(41);
        assert_eq!(truncate_title(&title), format!("{}...", "é".repeat(40)));
    }

    #[test]
    fn cover_prefers_artwork_then_avatar() {
        let user = User::new("dj").with_avatar("https://i1.example.com/avatar-large.jpg");
        let bare = Track::new("1", "One", user);
        let with_art = bare
            .clone()
            .with_artwork("https://i1.example.com/artworks-large.jpg");

        assert_eq!(
            cover_art_url(&with_art).as_deref(),
            Some("https://i1.example.com/artworks-t300x300.jpg")
        );
        assert_eq!(
            cover_art_url(&bare).as_deref(),
            Some("https://i1.example.com/avatar-t300x300.jpg")
        );
        assert_eq!(cover_art_url(&Track::new("2", "Two", User::new("x"))), None);
    }
}
