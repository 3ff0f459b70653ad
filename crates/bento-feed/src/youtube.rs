//! URL templates derived from video and channel ids.

/// Small thumbnail shown in the 2x2 gallery.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/mqdefault.jpg")
}

/// Full-size poster for the hero presentation.
pub fn poster_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

/// Watch page of a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://youtube.com/watch?v={video_id}")
}

/// Canonical channel page.
pub fn channel_url(channel_id: &str) -> String {
    format!("https://youtube.com/channel/{channel_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates() {
        assert_eq!(thumbnail_url("abc"), "https://img.youtube.com/vi/abc/mqdefault.jpg");
        assert_eq!(poster_url("abc"), "https://img.youtube.com/vi/abc/maxresdefault.jpg");
        assert_eq!(watch_url("abc"), "https://youtube.com/watch?v=abc");
        assert_eq!(channel_url("UC1"), "https://youtube.com/channel/UC1");
    }
}
