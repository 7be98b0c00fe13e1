use std::sync::OnceLock;

use regex::Regex;

const VIDEO_LINK_PATTERN: &str =
    r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]{11})(&.*)?$";

static VIDEO_LINK_RE: OnceLock<Regex> = OnceLock::new();

fn video_link_re() -> &'static Regex {
    VIDEO_LINK_RE.get_or_init(|| Regex::new(VIDEO_LINK_PATTERN).expect("video link pattern compiles"))
}

/// Accepts `youtube.com/watch?v=ID` and `youtu.be/ID` links with an optional
/// scheme and `www.` prefix. `ID` is exactly 11 characters of `[A-Za-z0-9_-]`
/// and may only be followed by `&...` parameters.
pub fn is_valid_video_link(text: &str) -> bool {
    video_link_re().is_match(text)
}

/// The 11-character video identifier of a valid link.
pub fn extract_video_id(text: &str) -> Option<&str> {
    video_link_re()
        .captures(text)
        .and_then(|cap: regex::Captures| cap.get(4))
        .map(|m: regex::Match| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    const SHAPES: &[&str] = &[
        "https://www.youtube.com/watch?v=",
        "http://www.youtube.com/watch?v=",
        "https://youtube.com/watch?v=",
        "www.youtube.com/watch?v=",
        "youtube.com/watch?v=",
        "https://www.youtu.be/",
        "https://youtu.be/",
        "http://youtu.be/",
        "www.youtu.be/",
        "youtu.be/",
    ];

    /// Every window of the alphabet, so each allowed character shows up in
    /// every position at least once.
    fn generated_ids(len: usize) -> Vec<String> {
        (0..ID_ALPHABET.len())
            .map(|start| {
                (0..len)
                    .map(|i| ID_ALPHABET[(start + i * 7) % ID_ALPHABET.len()] as char)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn accepts_generated_ids_in_every_shape() {
        for shape in SHAPES {
            for id in generated_ids(11) {
                let link = format!("{shape}{id}");
                assert!(is_valid_video_link(&link), "should accept {link}");
                assert_eq!(extract_video_id(&link), Some(id.as_str()));

                let with_params = format!("{link}&t=30&list=PL123");
                assert!(is_valid_video_link(&with_params), "should accept {with_params}");
            }
        }
    }

    #[test]
    fn rejects_ids_of_wrong_length() {
        for shape in SHAPES {
            for len in [0, 1, 10, 12, 20] {
                for id in generated_ids(len) {
                    let link = format!("{shape}{id}");
                    assert!(!is_valid_video_link(&link), "should reject {link}");
                }
            }
        }
    }

    #[test]
    fn rejects_disallowed_id_characters() {
        for shape in SHAPES {
            for bad in ['!', '.', '/', ' ', '=', '%', 'é', '?', '#'] {
                let id = format!("dQw4w9W{bad}XcQ");
                let link = format!("{shape}{id}");
                assert!(!is_valid_video_link(&link), "should reject {link}");
            }
        }
    }

    #[test]
    fn known_examples() {
        assert!(is_valid_video_link("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_video_link("youtu.be/dQw4w9WgXcQ&t=30"));
        assert!(!is_valid_video_link("not a url"));
        assert!(!is_valid_video_link(""));
    }

    #[test]
    fn rejects_other_shapes() {
        for link in [
            "https://vimeo.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "ftp://youtu.be/dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ?t=30",
            " youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ\n",
        ] {
            assert!(!is_valid_video_link(link), "should reject {link:?}");
            assert_eq!(extract_video_id(link), None);
        }
    }
}
