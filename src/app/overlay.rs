use gloo_timers::callback::Interval;
use leptos::{ev, html, prelude::*};
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::JsFuture;

use crate::i18n::{t, Tr};
use crate::projects::{Project, ProjectFile};
use crate::scrollbar;

use super::loader::{MediaImage, Resources};
use super::notify::Notifier;
use super::scrollbar::CustomScrollbar;
use super::track::Platform;
use super::viewer::ViewerHandle;
use super::AppState;

/// Pixels scrolled per repeat tick while a gallery arrow is held down.
const STRIP_STEP_PX: f64 = 14.0;
const STRIP_TICK_MS: u32 = 30;

#[component]
pub fn ProjectOverlay(project: &'static Project) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let navigate = use_navigate();

    let body_ref = NodeRef::<html::Div>::new();

    let back = move |_| {
        navigate(
            "/portfolio",
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    };

    view! {
        <div class="relative flex h-full flex-col">
            <div class="flex items-center gap-3 border-b border-gray-800 px-6 py-4">
                <button
                    class="rounded-md p-1 text-gray-400 transition-colors hover:text-teal-400"
                    on:click=back
                    aria-label="back"
                >
                    <svg viewBox="0 0 24 24" class="h-6 w-6 fill-current">
                        <path d="M15 5.4 13.6 4 6 12l7.6 8L15 18.6 8.8 12 15 5.4Z" />
                    </svg>
                </button>
                <h2 class="text-xl font-semibold text-gray-100">
                    {move || project.title.get(lang.get())}
                </h2>
            </div>

            <div node_ref=body_ref class="flex-1 overflow-y-auto px-6 py-5 [scrollbar-width:none]">
                <div class="mx-auto flex max-w-3xl flex-col gap-6">
                    <p
                        class="leading-relaxed text-gray-300"
                        inner_html=move || project.description.get(lang.get())
                    ></p>

                    {(!project.dates.is_empty())
                        .then(|| {
                            view! {
                                <div class="flex flex-col gap-1 text-sm text-gray-400">
                                    <For
                                        each=move || project.dates.iter().enumerate()
                                        key=|(i, _)| *i
                                        let:entry
                                    >
                                        <p inner_html=move || entry.1.get(lang.get())></p>
                                    </For>
                                </div>
                            }
                        })}

                    {project
                        .game
                        .map(|game| {
                            view! {
                                <p class="text-sm text-gray-400">
                                    <b class="text-gray-300">{move || t(lang.get(), "Game: ", "Игра: ")}</b>
                                    {game}
                                </p>
                            }
                        })}

                    {project
                        .supported_languages
                        .map(|langs| {
                            view! {
                                <p
                                    class="text-sm text-gray-400"
                                    inner_html=move || langs.get(lang.get())
                                ></p>
                            }
                        })}

                    {(!project.files.is_empty())
                        .then(|| {
                            view! {
                                <div class="flex flex-col gap-3">
                                    <h3 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                                        {move || t(lang.get(), "FILES", "ФАЙЛЫ")}
                                    </h3>
                                    <For
                                        each=move || project.files.iter().copied()
                                        key=|file| file.path
                                        let:file
                                    >
                                        <FileRow file=file />
                                    </For>
                                </div>
                            }
                        })}

                    {project
                        .gallery
                        .map(|gallery| {
                            let sources: Vec<String> = (0..gallery.count)
                                .map(|i| gallery.image_path(project.id, i))
                                .collect();
                            view! {
                                <GalleryStrip
                                    sources=sources
                                    captions=project.captions.to_vec()
                                    contain=gallery.contain
                                    aspect=gallery.aspect()
                                />
                            }
                        })}

                    {project
                        .video
                        .map(|video| {
                            view! {
                                <div class="flex flex-col gap-3">
                                    <h3 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                                        {move || t(lang.get(), "VIDEO", "ВИДЕО")}
                                    </h3>
                                    <iframe
                                        class="aspect-video w-full rounded-lg"
                                        src=video
                                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                        allowfullscreen
                                    ></iframe>
                                </div>
                            }
                        })}

                    {(!project.links.is_empty())
                        .then(|| {
                            view! {
                                <div class="flex flex-col gap-3 pb-4">
                                    <h3 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                                        {move || t(lang.get(), "LINKS", "ССЫЛКИ")}
                                    </h3>
                                    <For
                                        each=move || project.links.iter().enumerate()
                                        key=|(i, _)| *i
                                        let:entry
                                    >
                                        <LinkCard
                                            title=entry.1.title
                                            description=entry.1.description
                                            url=entry.1.url
                                        />
                                    </For>
                                </div>
                            }
                        })}
                </div>
            </div>

            <CustomScrollbar content=body_ref hide_after_ms=scrollbar::HIDE_LONG_MS />
        </div>
    }
}

/// Download link plus a source view button for one attached file.
#[component]
fn FileRow(file: ProjectFile) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let resources = expect_context::<Resources>();
    let notifier = expect_context::<Notifier>();
    let viewer = expect_context::<ViewerHandle>();

    let download_href = move || resources.cached_url(file.path).unwrap_or_else(|| file.path.to_string());

    let on_download = move |_| {
        let verb = if resources.is_cached(file.path) {
            t(lang.get_untracked(), "Saved:", "Сохранено:")
        } else {
            t(lang.get_untracked(), "Downloading:", "Загрузка:")
        };
        notifier.notify(format!("{verb} {}", file.name()), 3000);
    };

    view! {
        <div class="flex items-center justify-between rounded-lg bg-gray-800/60 px-4 py-3">
            <span class="font-mono text-sm text-gray-200">{file.name()}</span>
            <div class="flex items-center gap-3">
                <button
                    class="text-sm text-gray-400 transition-colors hover:text-teal-400"
                    on:click=move |_| viewer.open_code(file)
                >
                    {move || t(lang.get(), "View code", "Код")}
                </button>
                <a
                    class="text-gray-400 transition-colors hover:text-teal-400"
                    href=download_href
                    download=file.name()
                    on:click=on_download
                    aria-label="download"
                >
                    <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                        <path d="M11 4h2v9l3.5-3.5 1.4 1.4L12 16.8 6.1 10.9l1.4-1.4L11 13V4ZM5 18h14v2H5v-2Z" />
                    </svg>
                </a>
            </div>
        </div>
    }
}

/// Horizontal thumbnail reel; clicking a frame opens the full-screen viewer.
#[component]
fn GalleryStrip(
    sources: Vec<String>,
    captions: Vec<Tr>,
    contain: bool,
    aspect: f64,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let platform = expect_context::<Platform>();
    let viewer = expect_context::<ViewerHandle>();

    let strip_ref = NodeRef::<html::Div>::new();
    let repeat = StoredValue::new_local(None::<Interval>);

    let len = sources.len();
    let sources = StoredValue::new(sources);
    let captions = StoredValue::new(captions);

    let scroll_by = move |dx: f64| {
        if let Some(strip) = strip_ref.get_untracked() {
            strip.scroll_by_with_x_and_y(dx, 0.0);
        }
    };

    let start_repeat = move |dir: f64| {
        scroll_by(dir * STRIP_STEP_PX);
        repeat.set_value(Some(Interval::new(STRIP_TICK_MS, move || {
            scroll_by(dir * STRIP_STEP_PX);
        })));
    };
    let stop_repeat = move || repeat.set_value(None);

    let open = move |i: usize| {
        viewer.open_images(
            sources.with_value(|s| s.clone()),
            captions.with_value(|c| c.clone()),
            i,
            contain,
        );
    };

    let frame_style = format!("aspect-ratio: {aspect};");

    view! {
        <div class="flex flex-col gap-3">
            <h3 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                {move || t(lang.get(), "SCREENSHOTS", "СКРИНШОТЫ")}
            </h3>
            <div class="relative">
                <div
                    node_ref=strip_ref
                    class="flex gap-3 overflow-x-auto scroll-smooth [scrollbar-width:none]"
                >
                    <For each=move || 0..len key=|i| *i let:i>
                        <button
                            class="h-36 shrink-0 overflow-hidden rounded-lg"
                            style=frame_style.clone()
                            on:click=move |_| open(i)
                        >
                            <MediaImage
                                path=sources.with_value(|s| s[i].clone())
                                class="h-full w-full"
                                contain=contain
                            />
                        </button>
                    </For>
                </div>

                <Show when=move || !platform.touch.get() && len > 1>
                    <button
                        class="absolute left-0 top-1/2 -translate-y-1/2 rounded-full bg-gray-900/80 p-1.5 text-gray-300 hover:text-white"
                        on:mousedown=move |_| start_repeat(-1.0)
                        on:mouseup=move |_| stop_repeat()
                        on:mouseleave=move |_| stop_repeat()
                        aria-label="scroll left"
                    >
                        <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                            <path d="M15 5.4 13.6 4 6 12l7.6 8L15 18.6 8.8 12 15 5.4Z" />
                        </svg>
                    </button>
                    <button
                        class="absolute right-0 top-1/2 -translate-y-1/2 rounded-full bg-gray-900/80 p-1.5 text-gray-300 hover:text-white"
                        on:mousedown=move |_| start_repeat(1.0)
                        on:mouseup=move |_| stop_repeat()
                        on:mouseleave=move |_| stop_repeat()
                        aria-label="scroll right"
                    >
                        <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                            <path d="M9 5.4 10.4 4 18 12l-7.6 8L9 18.6 15.2 12 9 5.4Z" />
                        </svg>
                    </button>
                </Show>
            </div>
        </div>
    }
}

/// External link card with a copy-to-clipboard shortcut.
#[component]
pub fn LinkCard(title: Tr, description: Tr, url: &'static str) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let notifier = expect_context::<Notifier>();

    let copy = move |ev: ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            let promise = window.navigator().clipboard().write_text(url);
            match JsFuture::from(promise).await {
                Ok(_) => notifier.notify(
                    t(lang.get_untracked(), "Link copied", "Ссылка скопирована"),
                    3000,
                ),
                Err(err) => log::warn!("clipboard write failed: {err:?}"),
            }
        });
    };

    view! {
        <a
            class="group flex items-center justify-between rounded-lg bg-gray-800/60 px-4 py-3 transition-colors hover:bg-gray-800"
            href=url
            target="_blank"
            rel="noopener noreferrer"
        >
            <div class="flex flex-col">
                <span class="font-medium text-gray-100">{move || title.get(lang.get())}</span>
                <span class="text-sm text-gray-400">{move || description.get(lang.get())}</span>
            </div>
            <button
                class="rounded-md p-1.5 text-gray-500 transition-colors hover:text-teal-400"
                on:click=copy
                aria-label="copy link"
            >
                <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                    <path d="M8 4h12v12h-2V6H8V4ZM4 8h12v12H4V8Zm2 2v8h8v-8H6Z" />
                </svg>
            </button>
        </a>
    }
}
