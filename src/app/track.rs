use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::device::{self, Fingerprint, TrackPayload};

/// Browser capability flags, detected once on the client. Defaults are used
/// during server rendering and before hydration.
#[derive(Clone, Copy)]
pub struct Platform {
    pub touch: RwSignal<bool>,
    pub mobile: RwSignal<bool>,
    pub apple_mobile: RwSignal<bool>,
    pub webkit: RwSignal<bool>,
}

impl Platform {
    pub fn new() -> Platform {
        let platform = Platform {
            touch: RwSignal::new(false),
            mobile: RwSignal::new(false),
            apple_mobile: RwSignal::new(false),
            webkit: RwSignal::new(false),
        };
        Effect::new(move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let ua = window.navigator().user_agent().unwrap_or_default();
            platform.touch.set(coarse_pointer(&window));
            platform.mobile.set(device::is_mobile(&ua));
            platform.apple_mobile.set(device::is_apple_mobile(&ua));
            platform.webkit.set(device::is_webkit(&ua));
        });
        platform
    }
}

fn coarse_pointer(window: &web_sys::Window) -> bool {
    window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// Persistent visitor id plus the device fingerprint attached to chat and
/// tracking requests.
#[derive(Clone, Copy)]
pub struct Identity {
    pub uid: RwSignal<String>,
    pub fingerprint: RwSignal<Option<Fingerprint>>,
}

impl Identity {
    pub fn new() -> Identity {
        let identity = Identity {
            uid: RwSignal::new(String::new()),
            fingerprint: RwSignal::new(None),
        };

        #[cfg(feature = "hydrate")]
        {
            use codee::string::FromToStringCodec;
            use leptos_use::storage::use_local_storage;

            let (stored, set_stored, _) = use_local_storage::<String, FromToStringCodec>("uid");
            Effect::watch(
                || (),
                move |_, _, _| {
                    let mut uid = stored.get_untracked();
                    if uid.is_empty() {
                        uid = device::format_uuid(random_bytes());
                        set_stored.set(uid.clone());
                    }
                    identity.uid.set(uid);
                },
                true,
            );
        }

        Effect::new(move |_| {
            identity.fingerprint.set(Some(collect_fingerprint()));
        });

        identity
    }
}

fn random_bytes() -> [u8; 16] {
    let mut bytes = [0u8; 16];
    for byte in &mut bytes {
        *byte = (js_sys::Math::random() * 256.0) as u8;
    }
    bytes
}

pub fn collect_fingerprint() -> Fingerprint {
    let unknown = || Fingerprint {
        os: "Unknown".to_string(),
        cores: 0,
        memory: 0.0,
        timezone: "Unknown".to_string(),
    };
    let Some(window) = web_sys::window() else {
        return unknown();
    };
    let navigator = window.navigator();
    let navigator_js = JsValue::from(navigator.clone());
    let ua = navigator.user_agent().unwrap_or_default();

    // `deviceMemory` is not exposed everywhere, so it is read dynamically.
    let memory = js_sys::Reflect::get(&navigator_js, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    let timezone = js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Fingerprint {
        os: device::detect_os(&ua).to_string(),
        cores: navigator.hardware_concurrency() as u32,
        memory,
        timezone,
    }
}

/// Reports the visit to `/track-user` once the uid and fingerprint are ready.
/// Fire and forget; failures are only logged.
pub fn track_visit(identity: Identity) {
    let sent = StoredValue::new(false);
    Effect::new(move |_| {
        let uid = identity.uid.get();
        let Some(fingerprint) = identity.fingerprint.get() else {
            return;
        };
        if uid.is_empty() || sent.get_value() {
            return;
        }
        sent.set_value(true);

        let payload = visit_payload(uid, fingerprint);
        spawn_local(async move {
            let request = match gloo_net::http::Request::post("/track-user").json(&payload) {
                Ok(request) => request,
                Err(err) => {
                    log::debug!("visit report not sent: {err}");
                    return;
                }
            };
            if let Err(err) = request.send().await {
                log::debug!("visit report failed: {err}");
            }
        });
    });
}

fn visit_payload(uid: String, fingerprint: Fingerprint) -> TrackPayload {
    let window = web_sys::window();
    let ua = window
        .as_ref()
        .map(|w| w.navigator().user_agent().unwrap_or_default())
        .unwrap_or_default();
    let language = window
        .as_ref()
        .and_then(|w| w.navigator().language())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let resolution = window
        .as_ref()
        .and_then(|w| w.screen().ok())
        .and_then(|s| Some(format!("{}x{}", s.width().ok()?, s.height().ok()?)))
        .unwrap_or_else(|| "Unknown".to_string());
    let referrer = window
        .as_ref()
        .and_then(|w| w.document())
        .map(|d| d.referrer())
        .unwrap_or_default();

    TrackPayload {
        uid,
        fingerprint,
        language,
        browser: device::detect_browser(&ua).to_string(),
        device_type: device::device_type(&ua).to_string(),
        resolution,
        referrer: device::referrer_label(&referrer),
    }
}
