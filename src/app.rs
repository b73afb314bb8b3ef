mod about;
mod chat;
mod loader;
mod nav;
mod notify;
mod overlay;
mod portfolio;
mod scrollbar;
mod socials;
mod track;
mod video;
mod viewer;

use gloo_timers::callback::Timeout;
use leptos::{ev, prelude::*};
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{path, NavigateOptions};
use leptos_use::{use_event_listener, use_window};

use crate::i18n::Lang;
use crate::route;

use about::AboutSection;
use chat::{ChatController, ChatWidget};
use loader::Resources;
use nav::NavBar;
use notify::{Notifier, ToastStack};
use portfolio::PortfolioSection;
use socials::SocialsSection;
use track::{Identity, Platform};
use video::BackgroundVideo;
use viewer::{Viewer, ViewerHandle};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="bg-gray-900 font-mono text-gray-100">
                <App />
            </body>
        </html>
    }
}

/// Startup sequence: splash overlay first, then the shell appears, then the
/// secondary UI (chat hint, entrance effects) is allowed to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Splash,
    Loaded,
    Full,
}

const SPLASH_MS: u32 = 1000;
const FULL_MS: u32 = 2000;

#[derive(Clone, Copy)]
pub struct AppState {
    pub lang: RwSignal<Lang>,
    pub phase: RwSignal<LoadPhase>,
    pub menu_open: RwSignal<bool>,
}

impl AppState {
    fn new() -> AppState {
        AppState {
            lang: RwSignal::new(Lang::default()),
            phase: RwSignal::new(LoadPhase::Splash),
            menu_open: RwSignal::new(false),
        }
    }
}

/// Pushes a history entry for the current URL tagged with an overlay marker,
/// so the back button dismisses the overlay instead of leaving the page.
pub(crate) fn push_history_marker(kind: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let state = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &state,
        &wasm_bindgen::JsValue::from_str(kind),
        &wasm_bindgen::JsValue::TRUE,
    );
    if let Ok(history) = window.history() {
        let _ = history.push_state(&state, "");
    }
}

fn marker_state(kind: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.history().ok())
        .and_then(|h| h.state().ok())
        .map(|state| {
            js_sys::Reflect::get(&state, &wasm_bindgen::JsValue::from_str(kind))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let state = AppState::new();
    provide_context(state);

    let platform = Platform::new();
    provide_context(platform);

    let identity = Identity::new();
    provide_context(identity);

    let notifier = Notifier::new();
    provide_context(notifier);

    provide_context(Resources::new(notifier, platform, state.lang));
    provide_context(ViewerHandle::new());
    provide_context(ChatController::new(state, notifier, identity));

    #[cfg(feature = "hydrate")]
    {
        use codee::string::FromToStringCodec;
        use leptos_use::storage::use_local_storage;

        let (stored, set_stored, _) = use_local_storage::<String, FromToStringCodec>("lang");
        Effect::watch(
            || (),
            move |_, _, _| {
                let initial = stored
                    .get_untracked()
                    .parse::<Lang>()
                    .unwrap_or_else(|_| browser_lang());
                state.lang.set(initial);
            },
            true,
        );
        Effect::new(move |prev: Option<Lang>| {
            let lang = state.lang.get();
            if prev.is_some() {
                set_stored.set(lang.to_string());
            }
            lang
        });
    }

    track::track_visit(identity);

    view! {
        <Title formatter=|title| format!("Bredd Lane - {title}") />

        <Router>
            <SiteLayout />
        </Router>
    }
}

#[component]
fn SiteLayout() -> impl IntoView {
    let state = expect_context::<AppState>();
    let chat = expect_context::<ChatController>();
    let viewer = expect_context::<ViewerHandle>();

    let pathname = use_location().pathname;
    let navigate = use_navigate();

    // Normalize odd URLs in place (`/Portfolio/`, unknown ids, garbage paths).
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let path = pathname.get();
            let canonical = route::resolve(&path).path();
            if canonical != path {
                navigate(
                    &canonical,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        });
    }

    let section = Memo::new(move |_| route::resolve(&pathname.get()).section);

    // Splash → shell → full UI.
    Effect::watch(
        || (),
        move |_, _, _| {
            Timeout::new(SPLASH_MS, move || state.phase.set(LoadPhase::Loaded)).forget();
            Timeout::new(FULL_MS, move || state.phase.set(LoadPhase::Full)).forget();
        },
        true,
    );

    // Close whatever is on top: chat, then menu, then viewer, then the
    // project overlay.
    let escape_navigate = navigate.clone();
    let _ = use_event_listener(use_window(), ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        if chat.is_open() {
            chat.close();
        } else if state.menu_open.get_untracked() {
            state.menu_open.set(false);
        } else if viewer.is_open() {
            viewer.close();
        } else if route::resolve(&pathname.get_untracked()).project.is_some() {
            escape_navigate(
                "/portfolio",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    // Back button pops overlay markers before the router sees a URL change.
    let _ = use_event_listener(use_window(), ev::popstate, move |_| {
        if chat.is_open() && !marker_state("chat") {
            chat.close();
        }
        if state.menu_open.get_untracked() {
            state.menu_open.set(false);
        }
        if viewer.is_open() && !marker_state("viewer") {
            viewer.close();
        }
    });

    view! {
        <Title text=move || section.get().title() />

        <div class="flex h-dvh flex-col overflow-hidden">
            <BackgroundVideo />

            <Show when=move || state.phase.get() == LoadPhase::Splash>
                <div class="fixed inset-0 z-[60] flex items-center justify-center bg-gray-900">
                    <span class="animate-pulse text-2xl font-bold tracking-widest text-gray-100">
                        "BREDD " <span class="text-teal-400">"LANE"</span>
                    </span>
                </div>
            </Show>

            <NavBar />

            <main
                class="min-h-0 flex-1 transition-opacity duration-500"
                class:opacity-0=move || state.phase.get() == LoadPhase::Splash
            >
                <Routes fallback=AboutSection>
                    <Route path=path!("/") view=AboutSection />
                    <Route path=path!("/about") view=AboutSection />
                    <Route path=path!("/portfolio") view=PortfolioSection />
                    <Route path=path!("/portfolio/:project") view=PortfolioSection />
                    <Route path=path!("/socials") view=SocialsSection />
                </Routes>
            </main>

            <ToastStack />
            <ChatWidget />
            <Viewer />
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn browser_lang() -> Lang {
    web_sys::window()
        .map(|w| w.navigator().language().unwrap_or_default())
        .map(|tag| Lang::from_browser(&tag))
        .unwrap_or_default()
}
