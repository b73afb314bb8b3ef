use gloo_timers::callback::Timeout;
use leptos::{either::Either, ev, html, prelude::*};
use leptos::task::spawn_local;
use leptos_use::{
    use_document, use_event_listener, use_raf_fn_with_options, use_window, UseRafFnOptions,
    UseRafFnReturn,
};

use crate::gestures::{
    point, Point, Release, Tap, TapCadence, Update, ViewerGestures, DOUBLE_TAP_MS, SWIPE_ANIM_MS,
    UI_HIDE_MS,
};
use crate::highlight::{self, CodeHighlighter};
use crate::i18n::Tr;
use crate::loader::RetryPolicy;
use crate::projects::ProjectFile;
use crate::scrollbar::HIDE_LONG_MS;

use super::chat::ChatController;
use super::loader::{MediaImage, Resources};
use super::scrollbar::{CustomScrollbar, ScrollAxis};
use super::track::Platform;
use super::{push_history_marker, AppState};

const EASE: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

const FULLSCREEN_ENTER_PATH: &str =
    "M4 4h6v2H6v4H4V4Zm10 0h6v6h-2V6h-4V4ZM4 14h2v4h4v2H4v-6Zm14 0h2v6h-6v-2h4v-4Z";
const FULLSCREEN_EXIT_PATH: &str =
    "M10 4H8v4H4v2h6V4Zm10 4h-4V4h-2v6h6V8ZM4 14v2h4v4h2v-6H4Zm10 0v6h2v-4h4v-2h-6Z";

fn fullscreen_glyph(active: bool) -> &'static str {
    if active {
        FULLSCREEN_EXIT_PATH
    } else {
        FULLSCREEN_ENTER_PATH
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewerRequest {
    Images {
        sources: Vec<String>,
        captions: Vec<Tr>,
        index: usize,
        contain: bool,
    },
    Code {
        file: ProjectFile,
    },
}

/// Opens and closes the full-screen media viewer. Provided as context so the
/// overlay galleries, file buttons and global key handlers can drive it.
#[derive(Clone, Copy)]
pub struct ViewerHandle {
    request: RwSignal<Option<ViewerRequest>>,
    closing: RwSignal<bool>,
}

impl ViewerHandle {
    pub fn new() -> ViewerHandle {
        ViewerHandle {
            request: RwSignal::new(None),
            closing: RwSignal::new(false),
        }
    }

    pub fn open_images(
        &self,
        sources: Vec<String>,
        captions: Vec<Tr>,
        index: usize,
        contain: bool,
    ) {
        self.closing.set(false);
        self.request.set(Some(ViewerRequest::Images {
            sources,
            captions,
            index,
            contain,
        }));
        push_history_marker("viewer");
    }

    pub fn open_code(&self, file: ProjectFile) {
        self.closing.set(false);
        self.request.set(Some(ViewerRequest::Code { file }));
        push_history_marker("viewer");
    }

    pub fn is_open(&self) -> bool {
        self.request.with_untracked(|r| r.is_some()) && !self.closing.get_untracked()
    }

    /// Fades the viewer out, then drops all of its transient state.
    pub fn close(&self) {
        if self.request.with_untracked(|r| r.is_none()) || self.closing.get_untracked() {
            return;
        }
        self.closing.set(true);
        let handle = *self;
        Timeout::new(SWIPE_ANIM_MS as u32, move || {
            handle.request.set(None);
            handle.closing.set(false);
        })
        .forget();
    }
}

#[component]
pub fn Viewer() -> impl IntoView {
    let handle = expect_context::<ViewerHandle>();

    view! {
        {move || {
            handle
                .request
                .get()
                .map(|request| match request {
                    ViewerRequest::Images { sources, captions, index, contain } => {
                        Either::Left(
                            view! {
                                <ImageViewer sources=sources captions=captions index=index contain=contain />
                            },
                        )
                    }
                    ViewerRequest::Code { file } => {
                        Either::Right(view! { <CodeViewer file=file /> })
                    }
                })
        }}
    }
}

#[component]
fn ImageViewer(
    sources: Vec<String>,
    captions: Vec<Tr>,
    index: usize,
    contain: bool,
) -> impl IntoView {
    let handle = expect_context::<ViewerHandle>();
    let state = expect_context::<AppState>();
    let platform = expect_context::<Platform>();
    let resources = expect_context::<Resources>();
    let chat = expect_context::<ChatController>();
    let lang = state.lang;

    let len = sources.len();
    let sources = StoredValue::new(sources);
    let captions = StoredValue::new(captions);

    let machine = RwSignal::new(ViewerGestures::new(len, index));
    let idx = Memo::new(move |_| machine.with(|m| m.index()));

    let root_ref = NodeRef::<html::Div>::new();
    let stage_ref = NodeRef::<html::Div>::new();
    let img_ref = NodeRef::<html::Img>::new();

    let main_src = RwSignal::new(None::<String>);
    let img_style = RwSignal::new(String::new());
    let clone_index = RwSignal::new(None::<usize>);
    let clone_style = RwSignal::new(String::new());
    let ui_visible = RwSignal::new(true);
    let ui_timer = StoredValue::new_local(None::<Timeout>);
    let taps = StoredValue::new(TapCadence::default());
    let tap_timer = StoredValue::new_local(None::<Timeout>);
    let raf_active = RwSignal::new(false);

    // Resolve the current image through the cache; stale loads are dropped.
    Effect::new(move |_| {
        let i = idx.get();
        let path = sources.with_value(|s| s[i].clone());
        if let Some(url) = resources.cached_url(&path) {
            main_src.set(Some(url));
            return;
        }
        main_src.set(None);
        spawn_local(async move {
            if let Ok(resource) = resources.load(path, RetryPolicy::UNBOUNDED).await {
                if idx.get_untracked() == i {
                    main_src.set(Some(resource.url));
                }
            }
        });
    });

    let show_ui = move || {
        ui_visible.set(true);
        if !platform.touch.get_untracked() {
            ui_timer.set_value(Some(Timeout::new(UI_HIDE_MS as u32, move || {
                ui_visible.set(false);
            })));
        }
    };

    let apply_update = move |update: Update| match update {
        Update::None => {}
        Update::Pan { offset, scale } => img_style.set(format!(
            "transition: transform 0.08s ease-out; \
             transform: translate({}px, {}px) scale({scale});",
            offset.x, offset.y
        )),
        Update::SwipeX { dx, clone } => {
            img_style.set(format!("transition: none; transform: translateX({dx}px);"));
            if let Some(clone) = clone {
                if clone.fresh {
                    clone_index.set(Some(clone.index));
                }
                clone_style.set(format!(
                    "transition: none; transform: translateX({}px);",
                    clone.x
                ));
            }
        }
        Update::SwipeY { dy } => {
            img_style.set(format!("transition: none; transform: translateY({dy}px);"));
        }
    };

    let apply_release = move |release: Release| match release {
        Release::None => {}
        Release::Momentum => raf_active.set(true),
        Release::SpringBack => {
            img_style.set(format!(
                "transition: transform 0.2s {EASE}; transform: translate(0, 0) scale(1);"
            ));
            clone_index.set(None);
        }
        Release::Commit { exit_x, .. } => {
            img_style.set(format!(
                "transition: transform 0.3s {EASE}; transform: translateX({exit_x}px);"
            ));
            clone_style.set(format!(
                "transition: transform 0.3s {EASE}; transform: translateX(0);"
            ));
            Timeout::new(SWIPE_ANIM_MS as u32, move || {
                machine.update(|m| {
                    m.finish_transition();
                });
                clone_index.set(None);
                img_style.set("transition: none; transform: translateX(0) scale(1);".to_string());
            })
            .forget();
        }
        Release::Dismiss { down } => {
            let target = if down { "100%" } else { "-100%" };
            img_style.set(format!(
                "transition: transform 0.3s {EASE}, opacity 0.3s {EASE}; \
                 transform: translateY({target}); opacity: 0;"
            ));
            handle.close();
        }
    };

    // Momentum glide frames.
    let UseRafFnReturn { pause, resume, .. } = use_raf_fn_with_options(
        move |_| {
            let Some((offset, done)) = machine.try_update(|m| m.settle_frame()) else {
                return;
            };
            let scale = machine.with_untracked(|m| m.zoom().map_or(1.0, |z| z.scale));
            if done {
                raf_active.set(false);
                img_style.set(format!(
                    "transition: transform 0.2s {EASE}; \
                     transform: translate({}px, {}px) scale({scale});",
                    offset.x, offset.y
                ));
            } else {
                img_style.set(format!(
                    "transition: none; transform: translate({}px, {}px) scale({scale});",
                    offset.x, offset.y
                ));
            }
        },
        UseRafFnOptions::default().immediate(false),
    );
    Effect::new(move |_| {
        if raf_active.get() {
            resume();
        } else {
            pause();
        }
    });

    let toggle_zoom_at = move |client_x: f64, client_y: f64| {
        let (Some(stage), Some(img)) = (stage_ref.get_untracked(), img_ref.get_untracked())
        else {
            return;
        };
        let stage_rect = stage.get_bounding_client_rect();
        let img_rect = img.get_bounding_client_rect();
        if img_rect.width() <= 0.0 || img_rect.height() <= 0.0 {
            return;
        }
        let container = point(stage_rect.width(), stage_rect.height());
        let image = point(img_rect.width(), img_rect.height());
        let focal = point(
            (client_x - img_rect.left()) / img_rect.width(),
            (client_y - img_rect.top()) / img_rect.height(),
        );
        let toggled = machine
            .try_update(|m| m.toggle_zoom(container, image, focal))
            .flatten();
        match toggled {
            Some(Some(zoom)) => img_style.set(format!(
                "transition: transform 0.2s {EASE}; \
                 transform: translate({}px, {}px) scale({});",
                zoom.offset.x, zoom.offset.y, zoom.scale
            )),
            Some(None) => img_style.set(format!(
                "transition: transform 0.2s {EASE}; transform: translate(0, 0) scale(1);"
            )),
            None => {}
        }
    };

    let change = move |dir: i8| {
        let changed = machine.try_update(|m| m.change_image(dir)).flatten();
        if changed.is_some() {
            img_style.set("transition: none; transform: translate(0, 0) scale(1);".to_string());
            show_ui();
        }
    };

    let press_at = move |pos: Point| {
        let width = stage_ref
            .get_untracked()
            .map(|s| s.client_width() as f64)
            .unwrap_or(0.0);
        machine.update(|m| m.press(pos, width));
    };

    let _ = use_event_listener(img_ref, ev::mousedown, move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        press_at(point(ev.client_x() as f64, ev.client_y() as f64));
    });

    let _ = use_event_listener(img_ref, ev::touchstart, move |ev: web_sys::TouchEvent| {
        if ev.touches().length() > 1 {
            return;
        }
        let Some(touch) = ev.touches().get(0) else {
            return;
        };
        ev.prevent_default();
        let pos = point(touch.client_x() as f64, touch.client_y() as f64);

        let now = js_sys::Date::now();
        if taps.try_update_value(|t| t.tap(now)) == Some(Tap::Double) {
            // The deferred single-tap chrome toggle must not fire.
            tap_timer.set_value(None);
            toggle_zoom_at(pos.x, pos.y);
            return;
        }
        press_at(pos);
    });

    let _ = use_event_listener(use_document(), ev::mousemove, move |ev: web_sys::MouseEvent| {
        let update = machine
            .try_update(|m| m.motion(point(ev.client_x() as f64, ev.client_y() as f64)))
            .unwrap_or(Update::None);
        apply_update(update);
    });

    let _ = use_event_listener(use_document(), ev::touchmove, move |ev: web_sys::TouchEvent| {
        let Some(touch) = ev.touches().get(0) else {
            return;
        };
        let update = machine
            .try_update(|m| m.motion(point(touch.client_x() as f64, touch.client_y() as f64)))
            .unwrap_or(Update::None);
        apply_update(update);
    });

    let _ = use_event_listener(use_document(), ev::mouseup, move |ev: web_sys::MouseEvent| {
        let release = machine
            .try_update(|m| m.release(point(ev.client_x() as f64, ev.client_y() as f64)))
            .unwrap_or(Release::None);
        apply_release(release);
    });

    let _ = use_event_listener(use_document(), ev::touchend, move |ev: web_sys::TouchEvent| {
        let Some(touch) = ev.changed_touches().get(0) else {
            return;
        };
        let pos = point(touch.client_x() as f64, touch.client_y() as f64);
        let release = machine
            .try_update(|m| m.release(pos))
            .unwrap_or(Release::None);
        if release == Release::None && machine.with_untracked(|m| m.was_tap()) {
            // Single tap toggles the chrome, but only once the double-tap
            // window has passed; a second tap cancels the toggle and zooms.
            tap_timer.set_value(Some(Timeout::new(DOUBLE_TAP_MS as u32, move || {
                ui_visible.set(!ui_visible.get_untracked());
            })));
        }
        apply_release(release);
    });

    // Click-to-zoom on pointer devices; taps are handled on touchend.
    let _ = use_event_listener(img_ref, ev::click, move |ev: web_sys::MouseEvent| {
        if platform.touch.get_untracked() {
            return;
        }
        if !machine.with_untracked(|m| m.was_tap()) {
            return;
        }
        toggle_zoom_at(ev.client_x() as f64, ev.client_y() as f64);
    });

    // Arrow keys navigate while the viewer is up and the chat is closed.
    let _ = use_event_listener(use_window(), ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if chat.is_open() {
            return;
        }
        match ev.key().as_str() {
            "ArrowLeft" => {
                ev.prevent_default();
                change(-1);
            }
            "ArrowRight" => {
                ev.prevent_default();
                change(1);
            }
            _ => {}
        }
    });

    // Chrome auto-hide on pointer devices.
    let _ = use_event_listener(use_document(), ev::pointermove, move |_| {
        if !platform.touch.get_untracked() {
            show_ui();
        }
    });
    Effect::new(move |_| {
        show_ui();
    });

    let is_fullscreen = RwSignal::new(false);
    let _ = use_event_listener(use_document(), ev::fullscreenchange, move |_| {
        let active = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.fullscreen_element())
            .is_some();
        is_fullscreen.set(active);
    });

    let toggle_fullscreen = move |_| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else if let Some(el) = root_ref.get_untracked() {
            let _ = el.request_fullscreen();
        }
    };

    let caption = move || {
        captions
            .with_value(|c| c.get(idx.get()).copied())
            .map(|tr| tr.get(lang.get()).to_string())
            .unwrap_or_default()
    };

    let chrome_class = move || {
        if ui_visible.get() {
            "opacity-100"
        } else {
            "opacity-0 pointer-events-none"
        }
    };

    let img_class = if contain {
        "max-h-full max-w-full select-none object-contain cursor-zoom-in"
    } else {
        "max-h-full max-w-full select-none cursor-zoom-in"
    };

    view! {
        <div
            node_ref=root_ref
            class="fixed inset-0 z-50 flex flex-col bg-black/95 transition-opacity duration-300"
            class:opacity-0=move || handle.closing.get()
        >
            <div class=move || {
                format!(
                    "flex items-center justify-between px-4 py-3 transition-opacity duration-300 {}",
                    chrome_class(),
                )
            }>
                <span class="text-sm text-gray-300">
                    {move || format!("{} / {len}", idx.get() + 1)}
                </span>
                <span class="text-sm text-gray-300">{caption}</span>
                <div class="flex items-center gap-4">
                    <Show when=move || !platform.apple_mobile.get()>
                        <button
                            class="text-gray-300 hover:text-white"
                            on:click=toggle_fullscreen
                            aria-label="fullscreen"
                        >
                            <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                                <path d=move || fullscreen_glyph(is_fullscreen.get()) />
                            </svg>
                        </button>
                    </Show>
                    <button
                        class="text-gray-300 hover:text-white"
                        on:click=move |_| handle.close()
                        aria-label="close"
                    >
                        <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                            <path d="M6.4 5 5 6.4 10.6 12 5 17.6 6.4 19 12 13.4 17.6 19 19 17.6 13.4 12 19 6.4 17.6 5 12 10.6 6.4 5Z" />
                        </svg>
                    </button>
                </div>
            </div>

            <div node_ref=stage_ref class="relative flex flex-1 items-center justify-center overflow-hidden">
                {move || {
                    main_src
                        .get()
                        .map(|src| {
                            view! {
                                <img
                                    node_ref=img_ref
                                    src=src
                                    class=img_class
                                    style=move || img_style.get()
                                    draggable="false"
                                />
                            }
                        })
                }}
                {move || {
                    clone_index
                        .get()
                        .map(|i| {
                            let path = sources.with_value(|s| s[i].clone());
                            let src = resources.cached_url(&path).unwrap_or(path);
                            view! {
                                <img
                                    src=src
                                    class="pointer-events-none absolute max-h-full max-w-full select-none"
                                    style=move || clone_style.get()
                                />
                            }
                        })
                }}

                <Show when=move || len > 1>
                    <button
                        class=move || {
                            format!(
                                "absolute left-2 top-1/2 -translate-y-1/2 rounded-full bg-gray-800/80 \
                                 p-2 text-gray-200 transition-opacity duration-300 {}",
                                chrome_class(),
                            )
                        }
                        on:click=move |_| change(-1)
                        aria-label="previous"
                    >
                        <svg viewBox="0 0 24 24" class="h-6 w-6 fill-current">
                            <path d="M15 5.4 13.6 4 6 12l7.6 8L15 18.6 8.8 12 15 5.4Z" />
                        </svg>
                    </button>
                    <button
                        class=move || {
                            format!(
                                "absolute right-2 top-1/2 -translate-y-1/2 rounded-full bg-gray-800/80 \
                                 p-2 text-gray-200 transition-opacity duration-300 {}",
                                chrome_class(),
                            )
                        }
                        on:click=move |_| change(1)
                        aria-label="next"
                    >
                        <svg viewBox="0 0 24 24" class="h-6 w-6 fill-current">
                            <path d="M9 5.4 10.4 4 18 12l-7.6 8L9 18.6 15.2 12 9 5.4Z" />
                        </svg>
                    </button>
                </Show>
            </div>

            <Show when=move || len > 1>
                {
                    // Keep the active thumbnail in view as the index moves.
                    Effect::new(move |_| {
                        let i = idx.get();
                        if let Some(el) = web_sys::window()
                            .and_then(|w| w.document())
                            .and_then(|d| d.get_element_by_id(&format!("viewer-thumb-{i}")))
                        {
                            let options = web_sys::ScrollIntoViewOptions::new();
                            options.set_behavior(web_sys::ScrollBehavior::Smooth);
                            options.set_block(web_sys::ScrollLogicalPosition::Nearest);
                            options.set_inline(web_sys::ScrollLogicalPosition::Center);
                            el.scroll_into_view_with_scroll_into_view_options(&options);
                        }
                    });
                }
                <div class=move || {
                    format!(
                        "flex gap-2 overflow-x-auto px-4 py-3 transition-opacity duration-300 {}",
                        chrome_class(),
                    )
                }>
                    <For each=move || 0..len key=|i| *i let:i>
                        <button
                            id=format!("viewer-thumb-{i}")
                            class=move || {
                                format!(
                                    "h-14 w-24 shrink-0 overflow-hidden rounded-md {}",
                                    if idx.get() == i { "ring-2 ring-teal-400" } else { "opacity-60" },
                                )
                            }
                            on:click=move |_| {
                                machine.update(|m| {
                                    if !m.busy() {
                                        m.reset(i);
                                    }
                                });
                                img_style
                                    .set(
                                        "transition: none; transform: translate(0, 0) scale(1);"
                                            .to_string(),
                                    );
                            }
                        >
                            <MediaImage path=sources.with_value(|s| s[i].clone()) class="h-full w-full" />
                        </button>
                    </For>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn CodeViewer(file: ProjectFile) -> impl IntoView {
    let handle = expect_context::<ViewerHandle>();
    let resources = expect_context::<Resources>();

    let code_ref = NodeRef::<html::Div>::new();
    // (highlighted html, line count)
    let rendered = RwSignal::new(None::<(String, usize)>);

    let started = StoredValue::new(false);
    Effect::new(move |_| {
        if started.get_value() {
            return;
        }
        started.set_value(true);
        spawn_local(async move {
            let Ok(resource) = resources
                .load(file.path.to_string(), RetryPolicy::bounded(10))
                .await
            else {
                handle.close();
                return;
            };
            let text = decode_text(&resource.bytes, file.encoding);
            let highlighter = CodeHighlighter::new();
            let html = highlighter.highlight(&text, file.language);
            rendered.set(Some((html, highlight::line_count(&text))));
        });
    });

    view! {
        <div
            class="fixed inset-0 z-50 flex flex-col bg-black/95 transition-opacity duration-300"
            class:opacity-0=move || handle.closing.get()
        >
            <div class="flex items-center justify-between px-4 py-3">
                <span class="text-sm text-gray-300">{file.name()}</span>
                <div class="flex items-center gap-4">
                    <a
                        class="text-gray-300 hover:text-white"
                        href=file.path
                        download=file.name()
                        aria-label="download"
                    >
                        <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                            <path d="M11 4h2v9l3.5-3.5 1.4 1.4L12 16.8 6.1 10.9l1.4-1.4L11 13V4ZM5 18h14v2H5v-2Z" />
                        </svg>
                    </a>
                    <button
                        class="text-gray-300 hover:text-white"
                        on:click=move |_| handle.close()
                        aria-label="close"
                    >
                        <svg viewBox="0 0 24 24" class="h-5 w-5 fill-current">
                            <path d="M6.4 5 5 6.4 10.6 12 5 17.6 6.4 19 12 13.4 17.6 19 19 17.6 13.4 12 19 6.4 17.6 5 12 10.6 6.4 5Z" />
                        </svg>
                    </button>
                </div>
            </div>
            <div class="relative mx-4 mb-4 flex-1 overflow-hidden rounded-md bg-gray-900">
                <div
                    node_ref=code_ref
                    class="h-full overflow-auto p-4 font-mono text-sm [scrollbar-width:none]"
                >
                    {move || match rendered.get() {
                        None => Either::Left(
                            view! { <div class="animate-pulse text-gray-500">"..."</div> },
                        ),
                        Some((html, lines)) => {
                            Either::Right(
                                view! {
                                    <div class="flex min-w-max">
                                        <div class="mr-4 select-none text-right text-gray-600">
                                            <For each=move || 1..=lines key=|n| *n let:n>
                                                <div>{n}</div>
                                            </For>
                                        </div>
                                        <pre>
                                            <code inner_html=html></code>
                                        </pre>
                                    </div>
                                },
                            )
                        }
                    }}
                </div>
                <CustomScrollbar content=code_ref hide_after_ms=HIDE_LONG_MS />
                <CustomScrollbar
                    content=code_ref
                    axis=ScrollAxis::Horizontal
                    hide_after_ms=HIDE_LONG_MS
                />
            </div>
        </div>
    }
}

fn decode_text(bytes: &[u8], encoding: &str) -> String {
    let decoded = web_sys::TextDecoder::new_with_label(encoding)
        .or_else(|_| web_sys::TextDecoder::new())
        .ok()
        .and_then(|decoder| {
            let mut bytes = bytes.to_vec();
            decoder.decode_with_u8_array(&mut bytes).ok()
        });
    decoded.unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_button_swaps_its_glyph() {
        assert_eq!(fullscreen_glyph(false), FULLSCREEN_ENTER_PATH);
        assert_eq!(fullscreen_glyph(true), FULLSCREEN_EXIT_PATH);
        assert_ne!(fullscreen_glyph(false), fullscreen_glyph(true));
    }
}
