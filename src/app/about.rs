use chrono::{Datelike, NaiveDate, Utc};
use leptos::{html, prelude::*};

use crate::i18n::{t, Lang, Tr};
use crate::reveal;
use crate::scrollbar;

use super::scrollbar::CustomScrollbar;
use super::AppState;

const BIRTHDAY: (i32, u32, u32) = (2005, 8, 8);

struct LanguageSkill {
    name: Tr,
    /// Self-assessed proficiency, percent of the bar.
    level: u32,
}

const LANGUAGE_SKILLS: &[LanguageSkill] = &[
    LanguageSkill {
        name: Tr::new("RUSSIAN", "РУССКИЙ"),
        level: 100,
    },
    LanguageSkill {
        name: Tr::new("ENGLISH", "АНГЛИЙСКИЙ"),
        level: 80,
    },
    LanguageSkill {
        name: Tr::new("AZERBAIJANI", "АЗЕРБАЙДЖАНСКИЙ"),
        level: 60,
    },
];

struct TimelineEntry {
    date: Tr,
    text: Tr,
}

const EDUCATION_TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        date: Tr::new("Sep 2022", "Сен 2022"),
        text: Tr::new(
            "Enrolled at the Academy of Public Administration",
            "Поступил в Академию государственного управления",
        ),
    },
    TimelineEntry {
        date: Tr::new("Jul 2026", "Июл 2026"),
        text: Tr::new(
            "Bachelor's degree in Economics (expected)",
            "Бакалавриат по экономике (ожидается)",
        ),
    },
];

fn age_years() -> i32 {
    let (y, m, d) = BIRTHDAY;
    let today = Utc::now().date_naive();
    let born = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today);
    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

fn about_intro(lang: Lang) -> String {
    let age = age_years();
    match lang {
        Lang::En => format!(
            "Hi! I'm Muhammad, also known online as <b>Bredd Lane</b>. I'm {age} years old \
             and I live in Azerbaijan. I build software, mods and interfaces, and this \
             site is my hand-made home on the web."
        ),
        Lang::Ru => format!(
            "Привет! Я Мухаммед, в сети известен как <b>Bredd Lane</b>. Мне {age} лет, \
             живу в Азербайджане. Я делаю программы, моды и интерфейсы, а этот сайт \
             — мой собственноручно собранный дом в интернете."
        ),
    }
}

#[component]
pub fn AboutSection() -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let body_ref = NodeRef::<html::Div>::new();

    // Entrance animation: blocks slide in one after another once mounted.
    let mounted = RwSignal::new(false);
    Effect::new(move |_| {
        mounted.set(true);
    });
    let block_class = move || {
        if mounted.get() {
            "translate-y-0 opacity-100"
        } else {
            "translate-y-4 opacity-0"
        }
    };
    let block = move || format!("flex flex-col gap-3 transition-all duration-500 {}", block_class());
    let delay = |order: usize| format!("transition-delay: {}ms", reveal::block_delay_ms(order));

    view! {
        <div class="relative h-full">
            <div node_ref=body_ref class="h-full overflow-y-auto px-6 py-5 [scrollbar-width:none]">
                <div class="mx-auto flex max-w-3xl flex-col gap-8 pb-4">
                    <section class=move || block() style=delay(0)>
                        <h2 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                            {move || t(lang.get(), "ABOUT ME", "ОБО МНЕ")}
                        </h2>
                        <p
                            class="leading-relaxed text-gray-300"
                            inner_html=move || about_intro(lang.get())
                        ></p>
                        <p class="leading-relaxed text-gray-300">
                            {move || t(
                                lang.get(),
                                "Outside of code I'm into games, design and everything that \
                                 lets me tinker with how things work under the hood.",
                                "Помимо кода увлекаюсь играми, дизайном и всем, что позволяет \
                                 покопаться в том, как вещи устроены изнутри.",
                            )}
                        </p>
                        <p class="leading-relaxed text-gray-300">
                            {move || t(
                                lang.get(),
                                "This site is written from scratch with no page builders, \
                                 which is why it behaves the way I want it to.",
                                "Этот сайт написан с нуля без конструкторов, поэтому ведёт \
                                 себя ровно так, как я хочу.",
                            )}
                        </p>
                    </section>

                    <section class=move || block() style=delay(1)>
                        <h2 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                            {move || t(lang.get(), "EDUCATION", "ОБРАЗОВАНИЕ")}
                        </h2>
                        <div class="rounded-lg bg-gray-800/60 px-4 py-3">
                            <p class="font-medium text-gray-100">
                                {move || t(
                                    lang.get(),
                                    "Academy of Public Administration",
                                    "Академия государственного управления",
                                )}
                            </p>
                            <p class="text-sm text-gray-400">
                                {move || t(
                                    lang.get(),
                                    "Bachelor's degree in Economics",
                                    "Бакалавриат по экономике",
                                )}
                            </p>
                            <EducationTimeline mounted=mounted />
                        </div>
                    </section>

                    <section class=move || block() style=delay(2)>
                        <h2 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                            {move || t(lang.get(), "LANGUAGES", "ЯЗЫКИ")}
                        </h2>
                        <div class="flex flex-col gap-4">
                            {LANGUAGE_SKILLS
                                .iter()
                                .map(|skill| {
                                    let name = skill.name;
                                    let level = skill.level;
                                    view! {
                                        <div class="flex flex-col gap-1.5">
                                            <div class="flex justify-between text-sm">
                                                <span class="text-gray-200">
                                                    {move || name.get(lang.get())}
                                                </span>
                                                <span class="text-gray-500">{format!("{level}%")}</span>
                                            </div>
                                            <div class="h-1.5 overflow-hidden rounded-full bg-gray-800">
                                                <div
                                                    class="h-full rounded-full bg-teal-400 transition-all duration-700"
                                                    style=move || {
                                                        format!(
                                                            "width: {}%",
                                                            if mounted.get() { level } else { 0 },
                                                        )
                                                    }
                                                ></div>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </section>
                </div>
            </div>
            <CustomScrollbar content=body_ref hide_after_ms=scrollbar::HIDE_LONG_MS />
        </div>
    }
}

/// Study milestones: dots fade in one after another, then the connecting
/// lines draw downward.
#[component]
fn EducationTimeline(mounted: RwSignal<bool>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let dots = EDUCATION_TIMELINE.len();
    let step = reveal::timeline_step_ms(dots);
    let line_delay = reveal::timeline_line_delay_ms(dots);

    let dot_style = move |i: usize| {
        format!(
            "opacity: {}; transition: opacity {step}ms {} {}ms;",
            if mounted.get() { 1 } else { 0 },
            reveal::EASE,
            reveal::timeline_dot_delay_ms(i, dots),
        )
    };
    let line_style = move || {
        format!(
            "transform: scaleY({}); transform-origin: top; \
             transition: transform {step}ms {} {line_delay}ms;",
            if mounted.get() { 1 } else { 0 },
            reveal::EASE,
        )
    };

    view! {
        <div class="mt-3 flex flex-col">
            {EDUCATION_TIMELINE
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let last = i + 1 == dots;
                    let date = entry.date;
                    let text = entry.text;
                    view! {
                        <div class="flex gap-3">
                            <div class="flex w-3 flex-col items-center">
                                <div
                                    class="mt-1 h-3 w-3 shrink-0 rounded-full bg-teal-400"
                                    style=move || dot_style(i)
                                ></div>
                                <Show when=move || !last>
                                    <div class="w-0.5 flex-1 bg-teal-400/50" style=line_style></div>
                                </Show>
                            </div>
                            <div class=if last { "" } else { "pb-5" }>
                                <p class="text-sm text-gray-500">{move || date.get(lang.get())}</p>
                                <p class="text-sm text-gray-300">{move || text.get(lang.get())}</p>
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
