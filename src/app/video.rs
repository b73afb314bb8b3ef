use leptos::task::spawn_local;
use leptos::{html, prelude::*};
use leptos_router::hooks::use_location;

use crate::loader::{PlaybackGate, RetryPolicy, BACKGROUND_VIDEO};
use crate::route;

use super::chat::{ChatController, ChatPhase};
use super::loader::Resources;

/// Looping muted video behind the whole shell. The bytes come through the
/// resource cache like any other media; playback pauses while the chat
/// window or a project overlay sits on top.
#[component]
pub fn BackgroundVideo() -> impl IntoView {
    let resources = expect_context::<Resources>();
    let chat = expect_context::<ChatController>();
    let pathname = use_location().pathname;

    let video_ref = NodeRef::<html::Video>::new();
    let src = RwSignal::new(None::<String>);

    let started = StoredValue::new(false);
    Effect::new(move |_| {
        if started.get_value() {
            return;
        }
        started.set_value(true);
        spawn_local(async move {
            if let Ok(resource) = resources
                .load(BACKGROUND_VIDEO.to_string(), RetryPolicy::UNBOUNDED)
                .await
            {
                src.set(Some(resource.url));
            }
        });
    });

    Effect::new(move |_| {
        let gate = PlaybackGate {
            chat_open: matches!(chat.phase.get(), ChatPhase::Opening | ChatPhase::Open),
            overlay_open: route::resolve(&pathname.get()).project.is_some(),
        };
        let Some(video) = video_ref.get() else {
            return;
        };
        video.set_muted(true);
        video.set_loop(true);
        video.set_plays_inline(true);
        if gate.playing() {
            let _ = video.play();
        } else {
            let _ = video.pause();
        }
    });

    view! {
        <div class="fixed inset-0 -z-10 overflow-hidden bg-gray-900">
            {move || {
                src.get()
                    .map(|url| {
                        view! {
                            <video
                                node_ref=video_ref
                                src=url
                                autoplay=true
                                class="h-full w-full object-cover opacity-30"
                            ></video>
                        }
                    })
            }}
        </div>
    }
}
