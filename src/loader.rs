//! Resource loader bookkeeping: the byte cache, retry policy and media type
//! classification. Fetching itself happens in the app layer.

use std::collections::HashMap;

use thiserror::Error;

/// Delay between download attempts.
pub const RETRY_DELAY_MS: u64 = 1000;

/// The looping background video fetched at startup.
pub const BACKGROUND_VIDEO: &str = "/videos/background.mp4";

const MEDIA_EXTS: &[&str] = &[
    "mp4", "webm", "ogg", "jpg", "jpeg", "png", "gif", "webp", "svg",
];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to load file: {0}")]
    Failed(String),
}

pub fn extension(path: &str) -> &str {
    file_name(path).rsplit_once('.').map_or("", |(_, ext)| ext)
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Media files get data URLs on WebKit, where blob object URLs are flaky.
pub fn is_media(path: &str) -> bool {
    let ext = extension(path).to_ascii_lowercase();
    MEDIA_EXTS.contains(&ext.as_str())
}

pub fn mime_type(path: &str) -> &'static str {
    match extension(path).to_ascii_lowercase().as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// How often a download may be retried before giving up. `None` retries
/// forever (used for project media that must eventually appear).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const UNBOUNDED: RetryPolicy = RetryPolicy { max_attempts: None };

    pub const fn bounded(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts: Some(max_attempts),
        }
    }

    /// Whether another attempt may run after `attempts_made` failures.
    pub fn allows(&self, attempts_made: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts_made < max,
            None => true,
        }
    }
}

/// Background video playback gate. The loop plays only while nothing covers
/// the stage; the chat window and the project overlay both count as covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackGate {
    pub chat_open: bool,
    pub overlay_open: bool,
}

impl PlaybackGate {
    pub fn playing(self) -> bool {
        !self.chat_open && !self.overlay_open
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadedResource {
    pub bytes: Vec<u8>,
    /// Object or data URL usable as an element source.
    pub url: String,
}

/// Download results keyed by request path. Each path is fetched at most once;
/// later requests reuse the stored bytes and URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceCache {
    entries: HashMap<String, LoadedResource>,
}

impl ResourceCache {
    pub fn get(&self, path: &str) -> Option<&LoadedResource> {
        self.entries.get(path)
    }

    pub fn url(&self, path: &str) -> Option<String> {
        self.entries.get(path).map(|r| r.url.clone())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn insert(&mut self, path: String, resource: LoadedResource) {
        self.entries.entry(path).or_insert(resource);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_policy_stops_at_limit() {
        let policy = RetryPolicy::bounded(10);
        assert!(policy.allows(0));
        assert!(policy.allows(9));
        assert!(!policy.allows(10));
        assert!(!policy.allows(11));
    }

    #[test]
    fn unbounded_policy_never_stops() {
        assert!(RetryPolicy::UNBOUNDED.allows(0));
        assert!(RetryPolicy::UNBOUNDED.allows(1_000_000));
    }

    #[test]
    fn cache_keeps_first_insert() {
        let mut cache = ResourceCache::default();
        cache.insert(
            "/a.png".into(),
            LoadedResource {
                bytes: vec![1],
                url: "blob:first".into(),
            },
        );
        cache.insert(
            "/a.png".into(),
            LoadedResource {
                bytes: vec![2],
                url: "blob:second".into(),
            },
        );
        assert_eq!(cache.url("/a.png"), Some("blob:first".into()));
        assert!(cache.contains("/a.png"));
        assert!(!cache.contains("/b.png"));
    }

    #[test]
    fn background_video_pauses_under_chat_and_overlay() {
        assert!(PlaybackGate::default().playing());
        let chat = PlaybackGate {
            chat_open: true,
            overlay_open: false,
        };
        assert!(!chat.playing());
        let overlay = PlaybackGate {
            chat_open: false,
            overlay_open: true,
        };
        assert!(!overlay.playing());
        assert!(is_media(BACKGROUND_VIDEO));
        assert_eq!(mime_type(BACKGROUND_VIDEO), "video/mp4");
    }

    #[test]
    fn media_classification() {
        assert!(is_media("/projects/x/shot-1.PNG"));
        assert!(is_media("/video/intro.mp4"));
        assert!(!is_media("/projects/x/Tool.lua"));
        assert_eq!(file_name("/projects/x/Tool.lua"), "Tool.lua");
        assert_eq!(extension("Tool.lua"), "lua");
        assert_eq!(extension("noext"), "");
        assert_eq!(mime_type("logo.svg"), "image/svg+xml");
        assert_eq!(mime_type("Tool.lua"), "application/octet-stream");
    }
}
