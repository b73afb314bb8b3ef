use leptos::{either::Either, html, prelude::*};
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::projects::{self, Project, ProjectGroup};
use crate::reveal;
use crate::scrollbar;

use super::loader::MediaImage;
use super::overlay::ProjectOverlay;
use super::scrollbar::CustomScrollbar;
use super::AppState;

#[component]
pub fn PortfolioSection() -> impl IntoView {
    let params = use_params_map();
    let selected = Memo::new(move |_| {
        params
            .read()
            .get("project")
            .and_then(|id| projects::find(&id))
    });

    move || match selected.get() {
        Some(project) => Either::Left(view! { <ProjectOverlay project=project /> }),
        None => Either::Right(view! { <ProjectGrid /> }),
    }
}

#[component]
fn ProjectGrid() -> impl IntoView {
    let body_ref = NodeRef::<html::Div>::new();

    // Cards sweep in one after another across all groups.
    let mounted = RwSignal::new(false);
    Effect::new(move |_| {
        mounted.set(true);
    });

    let groups = [
        ProjectGroup::Web,
        ProjectGroup::Software,
        ProjectGroup::Graphics,
    ];

    let mut order = 0usize;
    let blocks = groups
        .into_iter()
        .map(|group| {
            let start = order;
            order += projects::in_group(group).count();
            view! { <GroupBlock group=group start=start mounted=mounted /> }
        })
        .collect_view();

    view! {
        <div class="relative h-full">
            <div node_ref=body_ref class="h-full overflow-y-auto px-6 py-5 [scrollbar-width:none]">
                <div class="mx-auto flex max-w-4xl flex-col gap-8 pb-4">{blocks}</div>
            </div>
            <CustomScrollbar content=body_ref hide_after_ms=scrollbar::HIDE_LONG_MS />
        </div>
    }
}

#[component]
fn GroupBlock(group: ProjectGroup, start: usize, mounted: RwSignal<bool>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let projects: Vec<&'static Project> = projects::in_group(group).collect();
    if projects.is_empty() {
        return None;
    }

    Some(view! {
        <section class="flex flex-col gap-4">
            <h2 class="text-sm font-semibold uppercase tracking-wider text-teal-400">
                {move || group.header().get(lang.get())}
            </h2>
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                {projects
                    .into_iter()
                    .enumerate()
                    .map(|(i, project)| {
                        view! { <ProjectCard project=project order=start + i mounted=mounted /> }
                    })
                    .collect_view()}
            </div>
        </section>
    })
}

#[component]
fn ProjectCard(project: &'static Project, order: usize, mounted: RwSignal<bool>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let lang = state.lang;

    let href = format!("/portfolio/{}", project.id);
    let cover = project.gallery.map(|g| (g.image_path(project.id, 0), g.contain));

    let entrance = move || {
        format!(
            "transition-all duration-500 {}",
            if mounted.get() {
                "translate-y-0 opacity-100"
            } else {
                "translate-y-4 opacity-0"
            },
        )
    };

    view! {
        <div
            class=entrance
            style=format!("transition-delay: {}ms", reveal::card_delay_ms(order))
        >
            <A href=href attr:class="group block overflow-hidden rounded-xl bg-gray-800/60 transition-colors hover:bg-gray-800">
                {cover
                    .map(|(path, contain)| {
                        view! {
                            <div class="aspect-video w-full overflow-hidden">
                                <MediaImage
                                    path=path
                                    class="h-full w-full transition-transform duration-300 group-hover:scale-105"
                                    contain=contain
                                />
                            </div>
                        }
                    })}
                <div class="px-4 py-3">
                    <h3 class="font-medium text-gray-100">{move || project.title.get(lang.get())}</h3>
                </div>
            </A>
        </div>
    }
}
