//! User-agent classification and the device fingerprint sent with tracking
//! and chat requests. Pure string work; the browser glue lives in the app
//! layer.

use serde::Serialize;

pub fn detect_os(ua: &str) -> &'static str {
    let lower = ua.to_ascii_lowercase();
    if lower.contains("android") {
        "Android"
    } else if is_apple_mobile(ua) {
        "iOS"
    } else if lower.contains("win") {
        "Windows"
    } else if lower.contains("mac") {
        "macOS"
    } else if lower.contains("linux") {
        "Linux"
    } else {
        "Unknown"
    }
}

/// Order matters: Chromium forks advertise `Chrome/` and `Safari/` too, so
/// the forks are checked first and Safari last.
pub fn detect_browser(ua: &str) -> &'static str {
    if ua.contains("Edg/") {
        "Edge"
    } else if ua.contains("OPR/") {
        if ua.contains("GX/") {
            "Opera GX"
        } else {
            "Opera"
        }
    } else if ua.contains("YaBrowser/") {
        "Yandex Browser"
    } else if ua.contains("Chrome/") {
        "Chrome"
    } else if ua.contains("Safari/") {
        "Safari"
    } else if ua.contains("Firefox/") {
        "Firefox"
    } else {
        "Unknown"
    }
}

pub fn is_apple_mobile(ua: &str) -> bool {
    ["iPhone", "iPad", "iPod"].iter().any(|m| ua.contains(m))
}

/// Mobile or tablet heuristic used to label the device type.
pub fn is_mobile(ua: &str) -> bool {
    let lower = ua.to_ascii_lowercase();
    is_apple_mobile(ua)
        || [
            "android",
            "webos",
            "blackberry",
            "iemobile",
            "opera mini",
            "mobile",
            "tablet",
        ]
        .iter()
        .any(|m| lower.contains(m))
}

/// True for WebKit engines where blob object URLs for media are unreliable
/// and a data URL has to be used instead.
pub fn is_webkit(ua: &str) -> bool {
    let lower = ua.to_ascii_lowercase();
    lower.contains("applewebkit")
        && !lower.contains("chrome")
        && !lower.contains("crios")
        && !lower.contains("fxios")
}

pub fn device_type(ua: &str) -> &'static str {
    if is_mobile(ua) {
        "Mobile"
    } else {
        "Desktop"
    }
}

/// Formats 16 random bytes as a version 4 UUID, forcing the version and
/// variant bits so the result is well-formed regardless of the input.
pub fn format_uuid(mut bytes: [u8; 16]) -> String {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        hex[0..4].join(""),
        hex[4..6].join(""),
        hex[6..8].join(""),
        hex[8..10].join(""),
        hex[10..16].join(""),
    )
}

/// Referrer label for tracking: `Direct` when absent, otherwise capped at 50
/// characters.
pub fn referrer_label(referrer: &str) -> String {
    if referrer.is_empty() {
        return "Direct".to_string();
    }
    referrer.chars().take(50).collect()
}

/// Stable hardware traits, also attached to every chat request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fingerprint {
    pub os: String,
    pub cores: u32,
    pub memory: f64,
    pub timezone: String,
}

/// Body of the `/track-user` visit report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPayload {
    pub uid: String,
    #[serde(flatten)]
    pub fingerprint: Fingerprint,
    pub language: String,
    pub browser: String,
    pub device_type: String,
    pub resolution: String,
    pub referrer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIN_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const WIN_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0";
    const OPERA_GX: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 OPR/112.0.0.0 GX/112";
    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
    const LINUX_FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0";

    #[test]
    fn os_detection() {
        assert_eq!(detect_os(WIN_CHROME), "Windows");
        assert_eq!(detect_os(IPHONE_SAFARI), "iOS");
        assert_eq!(detect_os(LINUX_FIREFOX), "Linux");
        assert_eq!(detect_os("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5)"), "macOS");
        assert_eq!(detect_os("Mozilla/5.0 (Linux; Android 14)"), "Android");
        assert_eq!(detect_os(""), "Unknown");
    }

    #[test]
    fn browser_detection_prefers_forks() {
        assert_eq!(detect_browser(WIN_CHROME), "Chrome");
        assert_eq!(detect_browser(WIN_EDGE), "Edge");
        assert_eq!(detect_browser(OPERA_GX), "Opera GX");
        assert_eq!(detect_browser(IPHONE_SAFARI), "Safari");
        assert_eq!(detect_browser(LINUX_FIREFOX), "Firefox");
        assert_eq!(detect_browser("curl/8.0"), "Unknown");
    }

    #[test]
    fn mobile_and_webkit_flags() {
        assert!(is_mobile(IPHONE_SAFARI));
        assert!(is_apple_mobile(IPHONE_SAFARI));
        assert!(!is_mobile(WIN_CHROME));
        assert!(is_webkit(IPHONE_SAFARI));
        assert!(!is_webkit(WIN_CHROME));
        assert_eq!(device_type(IPHONE_SAFARI), "Mobile");
        assert_eq!(device_type(LINUX_FIREFOX), "Desktop");
    }

    #[test]
    fn uuid_has_version_and_variant_bits() {
        let id = format_uuid([0; 16]);
        assert_eq!(id, "00000000-0000-4000-8000-000000000000");
        let id = format_uuid([0xff; 16]);
        assert_eq!(id.len(), 36);
        assert_eq!(&id[14..15], "4");
        let variant = id.as_bytes()[19];
        assert!(matches!(variant, b'8' | b'9' | b'a' | b'b'));
    }

    #[test]
    fn referrer_labels() {
        assert_eq!(referrer_label(""), "Direct");
        assert_eq!(referrer_label("https://a.example/"), "https://a.example/");
        let long = "x".repeat(80);
        assert_eq!(referrer_label(&long).chars().count(), 50);
    }

    #[test]
    fn track_payload_wire_shape() {
        let payload = TrackPayload {
            uid: "u".into(),
            fingerprint: Fingerprint {
                os: "Linux".into(),
                cores: 8,
                memory: 8.0,
                timezone: "UTC".into(),
            },
            language: "en-US".into(),
            browser: "Firefox".into(),
            device_type: "Desktop".into(),
            resolution: "1920x1080".into(),
            referrer: "Direct".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["deviceType"], "Desktop");
        assert_eq!(json["os"], "Linux");
        assert_eq!(json["cores"], 8);
        assert_eq!(json["resolution"], "1920x1080");
    }
}
