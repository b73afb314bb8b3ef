use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::i18n::{t, Lang};
use crate::route::{self, Section};

use super::AppState;

#[component]
pub fn NavBar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let menu_open = state.menu_open;

    let location = use_location();
    let section = Memo::new(move |_| route::resolve(&location.pathname.get()).section);

    view! {
        <header class="relative z-40 flex items-center justify-between px-6 py-4">
            <A href="/about" attr:class="select-none text-lg font-bold tracking-wide text-gray-100">
                "BREDD " <span class="text-teal-400">"LANE"</span>
            </A>

            <nav class="hidden items-center gap-8 md:flex">
                <NavLink section=Section::About current=section />
                <NavLink section=Section::Portfolio current=section />
                <NavLink section=Section::Socials current=section />
                <LangSwitch />
            </nav>

            <div class="flex items-center gap-4 md:hidden">
                <LangSwitch />
                <button
                    class="flex h-8 w-8 flex-col items-center justify-center gap-1.5"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                    aria-label="menu"
                >
                    <span
                        class="h-0.5 w-6 bg-gray-200 transition-transform duration-300"
                        class:rotate-45=move || menu_open.get()
                        class:translate-y-2=move || menu_open.get()
                    ></span>
                    <span
                        class="h-0.5 w-6 bg-gray-200 transition-opacity duration-300"
                        class:opacity-0=move || menu_open.get()
                    ></span>
                    <span
                        class="h-0.5 w-6 bg-gray-200 transition-transform duration-300"
                        class:-rotate-45=move || menu_open.get()
                        class:-translate-y-2=move || menu_open.get()
                    ></span>
                </button>
            </div>

            <div
                class=move || {
                    format!(
                        "absolute left-0 right-0 top-full flex flex-col gap-2 bg-gray-900/95 px-6 \
                         pb-4 backdrop-blur transition-all duration-300 md:hidden {}",
                        if menu_open.get() {
                            "visible translate-y-0 opacity-100"
                        } else {
                            "invisible -translate-y-2 opacity-0"
                        },
                    )
                }
            >
                <NavLink section=Section::About current=section />
                <NavLink section=Section::Portfolio current=section />
                <NavLink section=Section::Socials current=section />
            </div>
        </header>
    }
}

fn nav_label(lang: Lang, section: Section) -> &'static str {
    match section {
        Section::About => t(lang, "AUTHOR", "АВТОР"),
        Section::Portfolio => t(lang, "PORTFOLIO", "ПОРТФОЛИО"),
        Section::Socials => t(lang, "SOCIALS", "СОЦСЕТИ"),
    }
}

#[component]
fn NavLink(section: Section, current: Memo<Section>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;
    let menu_open = state.menu_open;

    let class = move || {
        format!(
            "text-sm font-medium tracking-wider transition-colors {}",
            if current.get() == section {
                "text-teal-400"
            } else {
                "text-gray-400 hover:text-gray-100"
            },
        )
    };

    view! {
        <A
            href=section.path()
            attr:class=class
            on:click=move |_| menu_open.set(false)
        >
            {move || nav_label(lang.get(), section)}
        </A>
    }
}

/// EN/RU toggle; the highlight pill slides to the active half.
#[component]
fn LangSwitch() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    view! {
        <button
            class="relative flex h-8 w-20 select-none items-center rounded-full bg-gray-800 text-xs font-semibold"
            on:click=move |_| lang.update(|l| *l = l.toggled())
            aria-label="language"
        >
            <span
                class="absolute top-1 h-6 w-9 rounded-full bg-teal-500/90 transition-transform duration-[400ms] ease-[cubic-bezier(0.4,0,0.2,1)]"
                class:translate-x-1=move || lang.get() == Lang::En
                class:translate-x-10=move || lang.get() == Lang::Ru
            ></span>
            <span class=move || {
                format!(
                    "relative z-10 flex-1 text-center {}",
                    if lang.get() == Lang::En { "text-gray-900" } else { "text-gray-400" },
                )
            }>"EN"</span>
            <span class=move || {
                format!(
                    "relative z-10 flex-1 text-center {}",
                    if lang.get() == Lang::Ru { "text-gray-900" } else { "text-gray-400" },
                )
            }>"RU"</span>
        </button>
    }
}
