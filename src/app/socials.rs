use leptos::{ev, html, prelude::*};
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::i18n::{t, Lang, Tr};
use crate::reveal;
use crate::scrollbar;

use super::notify::Notifier;
use super::scrollbar::CustomScrollbar;
use super::AppState;

enum SocialAction {
    /// Opens the URL in a new tab.
    Open(&'static str),
    /// Copies the value to the clipboard and shows a confirmation toast.
    Copy {
        value: &'static str,
        copied: Tr,
    },
}

struct SocialEntry {
    name: &'static str,
    action: SocialAction,
}

struct SocialGroup {
    header: Tr,
    entries: &'static [SocialEntry],
}

const SOCIAL_GROUPS: &[SocialGroup] = &[
    SocialGroup {
        header: Tr::new("CONTACTS", "КОНТАКТЫ"),
        entries: &[
            SocialEntry {
                name: "Telegram",
                action: SocialAction::Open("https://t.me/breddlane"),
            },
            SocialEntry {
                name: "Discord",
                action: SocialAction::Copy {
                    value: "breddlane",
                    copied: Tr::new("Copied Discord ID: breddlane", "Discord ID скопирован: breddlane"),
                },
            },
            SocialEntry {
                name: "Email",
                action: SocialAction::Copy {
                    value: "breddlane@proton.me",
                    copied: Tr::new(
                        "Copied Email: breddlane@proton.me",
                        "Email скопирован: breddlane@proton.me",
                    ),
                },
            },
        ],
    },
    SocialGroup {
        header: Tr::new("PROF NETWORKS", "ПРОФСЕТИ"),
        entries: &[
            SocialEntry {
                name: "GitHub",
                action: SocialAction::Open("https://github.com/breddlane"),
            },
            SocialEntry {
                name: "BlastHack",
                action: SocialAction::Open("https://www.blast.hk/members/breddlane/"),
            },
        ],
    },
    SocialGroup {
        header: Tr::new("MEDIA", "МЕДИА"),
        entries: &[
            SocialEntry {
                name: "YouTube",
                action: SocialAction::Open("https://www.youtube.com/@breddlane"),
            },
            SocialEntry {
                name: "Instagram",
                action: SocialAction::Open("https://www.instagram.com/breddlane"),
            },
        ],
    },
    SocialGroup {
        header: Tr::new("FUN", "РАЗВЛЕЧЕНИЯ"),
        entries: &[
            SocialEntry {
                name: "Steam",
                action: SocialAction::Open("https://steamcommunity.com/id/breddlane"),
            },
            SocialEntry {
                name: "Twitch",
                action: SocialAction::Open("https://www.twitch.tv/breddlane"),
            },
        ],
    },
];

fn copy_to_clipboard(value: &'static str, toast: String, notifier: Notifier) {
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(value);
        match JsFuture::from(promise).await {
            Ok(_) => notifier.notify(toast, 3000),
            Err(err) => log::warn!("clipboard write failed: {err:?}"),
        }
    });
}

#[component]
pub fn SocialsSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let body_ref = NodeRef::<html::Div>::new();

    let mounted = RwSignal::new(false);
    Effect::new(move |_| {
        mounted.set(true);
    });

    // Staggered entrance, one row at a time across all groups.
    let mut order = 0_usize;

    view! {
        <div class="relative h-full">
            <div node_ref=body_ref class="h-full overflow-y-auto px-6 py-5 [scrollbar-width:none]">
                <div class="mx-auto flex max-w-3xl flex-col gap-8 pb-4">
                    {SOCIAL_GROUPS
                        .iter()
                        .map(|group| {
                            let header = group.header;
                            let rows = group
                                .entries
                                .iter()
                                .map(|entry| {
                                    order += 1;
                                    view! {
                                        <SocialRow entry=entry order=order mounted=mounted />
                                    }
                                })
                                .collect_view();
                            view! {
                                <section class="flex flex-col gap-3">
                                    <h2 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                                        {move || header.get(lang.get())}
                                    </h2>
                                    <div class="flex flex-col gap-2">{rows}</div>
                                </section>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <CustomScrollbar content=body_ref hide_after_ms=scrollbar::HIDE_LONG_MS />
        </div>
    }
}

#[component]
fn SocialRow(
    entry: &'static SocialEntry,
    order: usize,
    mounted: RwSignal<bool>,
) -> impl IntoView {
    let notifier = expect_context::<Notifier>();
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let class = move || {
        format!(
            "group flex items-center gap-3 rounded-lg bg-gray-800/60 px-4 py-3 \
             transition-all duration-[400ms] ease-[cubic-bezier(0.4,0,0.2,1)] \
             hover:bg-gray-800 {}",
            if mounted.get() {
                "translate-x-0 opacity-100"
            } else {
                "-translate-x-4 opacity-0"
            },
        )
    };
    let style = format!("transition-delay: {}ms", reveal::row_delay_ms(order));

    let label = view! {
        <span class="font-medium text-gray-100 transition-transform duration-[400ms] group-hover:translate-x-1">
            {entry.name}
        </span>
    };

    match &entry.action {
        SocialAction::Open(url) => view! {
            <a
                class=class
                style=style
                href=*url
                target="_blank"
                rel="noopener noreferrer"
            >
                {label}
            </a>
        }
        .into_any(),
        SocialAction::Copy { value, copied } => {
            let value = *value;
            let copied = *copied;
            let on_click = move |ev: ev::MouseEvent| {
                ev.prevent_default();
                copy_to_clipboard(value, copied.get(lang.get_untracked()).to_string(), notifier);
            };
            view! {
                <a class=class style=style href="#" on:click=on_click>
                    {label}
                    <span class="ml-auto text-xs uppercase tracking-wider text-gray-500">
                        {move || t(lang.get(), "copy", "копировать")}
                    </span>
                </a>
            }
            .into_any()
        }
    }
}
