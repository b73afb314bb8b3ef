use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::i18n::{t, Lang};
use crate::loader::{self, LoadError, LoadedResource, ResourceCache, RetryPolicy, RETRY_DELAY_MS};

use super::notify::Notifier;
use super::track::Platform;

/// Download-once resource cache. Bytes and element URLs are shared between
/// the galleries, the viewer and the download buttons.
#[derive(Clone, Copy)]
pub struct Resources {
    cache: StoredValue<ResourceCache>,
    notifier: Notifier,
    platform: Platform,
    lang: RwSignal<Lang>,
}

impl Resources {
    pub fn new(notifier: Notifier, platform: Platform, lang: RwSignal<Lang>) -> Resources {
        Resources {
            cache: StoredValue::new(ResourceCache::default()),
            notifier,
            platform,
            lang,
        }
    }

    pub fn cached_url(&self, path: &str) -> Option<String> {
        self.cache.with_value(|c| c.url(path))
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.with_value(|c| c.contains(path))
    }

    /// Fetches a file, retrying per `policy` with a fixed delay. Repeated
    /// requests for the same path are served from the cache. On final failure
    /// the user gets a toast and the error propagates to the caller.
    pub async fn load(self, path: String, policy: RetryPolicy) -> Result<LoadedResource, LoadError> {
        if let Some(hit) = self.cache.with_value(|c| c.get(&path).cloned()) {
            return Ok(hit);
        }

        let mut attempts = 0u32;
        loop {
            match fetch_bytes(&path).await {
                Ok(bytes) => {
                    let url = element_url(&path, &bytes, self.platform.webkit.get_untracked());
                    let resource = LoadedResource { bytes, url };
                    self.cache
                        .update_value(|c| c.insert(path.clone(), resource.clone()));
                    return Ok(resource);
                }
                Err(err) => {
                    attempts += 1;
                    log::debug!("download attempt {attempts} failed for {path}: {err}");
                    if !policy.allows(attempts) {
                        log::warn!("giving up on {path} after {attempts} attempts");
                        let name = loader::file_name(&path).to_string();
                        let lang = self.lang.get_untracked();
                        self.notifier.notify(
                            format!(
                                "{}: {name}",
                                t(lang, "Failed to load file", "Не удалось загрузить файл")
                            ),
                            5000,
                        );
                        return Err(LoadError::Failed(name));
                    }
                    TimeoutFuture::new(RETRY_DELAY_MS as u32).await;
                }
            }
        }
    }
}

async fn fetch_bytes(path: &str) -> Result<Vec<u8>, gloo_net::Error> {
    let response = Request::get(path).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "HTTP {} for {path}",
            response.status()
        )));
    }
    response.binary().await
}

/// URL usable as an element source. Media on WebKit gets a data URL because
/// object URLs for media elements misbehave there.
fn element_url(path: &str, bytes: &[u8], webkit: bool) -> String {
    if loader::is_media(path) && webkit {
        data_url(path, bytes)
    } else {
        object_url(path, bytes).unwrap_or_else(|| data_url(path, bytes))
    }
}

fn object_url(path: &str, bytes: &[u8]) -> Option<String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(loader::mime_type(path));
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

fn data_url(path: &str, bytes: &[u8]) -> String {
    // btoa takes a latin-1 string where every char is one byte.
    let binary: String = bytes.iter().map(|b| *b as char).collect();
    let encoded = web_sys::window()
        .and_then(|w| w.btoa(&binary).ok())
        .unwrap_or_default();
    format!("data:{};base64,{encoded}", loader::mime_type(path))
}

/// An image that resolves through the resource cache, showing a shimmer until
/// the bytes arrive. Project media retries until it loads.
#[component]
pub fn MediaImage(
    path: String,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] alt: String,
    #[prop(optional)] contain: bool,
) -> impl IntoView {
    let resources = expect_context::<Resources>();
    let src = RwSignal::new(None::<String>);

    let started = StoredValue::new(false);
    Effect::new(move |_| {
        if started.get_value() {
            return;
        }
        started.set_value(true);
        let path = path.clone();
        spawn_local(async move {
            if let Ok(resource) = resources.load(path, RetryPolicy::UNBOUNDED).await {
                src.set(Some(resource.url));
            }
        });
    });

    let img_class = if contain {
        "h-full w-full object-contain"
    } else {
        "h-full w-full object-cover"
    };

    view! {
        <div class=format!("relative overflow-hidden {class}")>
            <Show when=move || src.get().is_none()>
                <div class="absolute inset-0 animate-pulse bg-gray-700"></div>
            </Show>
            {move || {
                let alt = alt.clone();
                src.get().map(|url| view! { <img src=url alt=alt class=img_class /> })
            }}
        </div>
    }
}
