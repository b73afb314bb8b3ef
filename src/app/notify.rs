use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_use::{use_raf_fn_with_options, UseRafFnOptions, UseRafFnReturn};

use crate::notify::{Toast, ToastQueue, EXIT_MS};

/// Shared handle for showing toast notifications from anywhere in the app.
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Notifier {
        Notifier {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn notify(&self, message: impl Into<String>, duration_ms: u64) {
        let promoted = self
            .queue
            .try_update(|q| q.push(message.into(), duration_ms, js_sys::Date::now()))
            .flatten();
        if let Some(toast) = promoted {
            self.schedule(toast);
        }
    }

    /// Runs the toast lifecycle: display duration, exit animation, removal,
    /// and scheduling of whatever gets promoted into the freed slot.
    fn schedule(&self, toast: Toast) {
        let notifier = *self;
        let id = toast.id;
        Timeout::new(toast.duration_ms as u32, move || {
            notifier.queue.update(|q| q.begin_exit(id));
            Timeout::new(EXIT_MS as u32, move || {
                let next = notifier
                    .queue
                    .try_update(|q| q.remove(id, js_sys::Date::now()))
                    .flatten();
                if let Some(next) = next {
                    notifier.schedule(next);
                }
            })
            .forget();
        })
        .forget();
    }

    fn active(&self) -> Vec<Toast> {
        self.queue.with(|q| q.active().to_vec())
    }

    fn has_active(&self) -> bool {
        self.queue.with(|q| !q.active().is_empty())
    }

    fn is_leaving(&self, id: u64) -> bool {
        self.queue
            .with(|q| q.active().iter().any(|t| t.id == id && t.leaving))
    }
}

/// Fixed toast container in the bottom-right corner.
#[component]
pub fn ToastStack() -> impl IntoView {
    let notifier = expect_context::<Notifier>();
    let now = RwSignal::new(0.0_f64);

    // The progress bars only animate while something is visible.
    let UseRafFnReturn { pause, resume, .. } = use_raf_fn_with_options(
        move |_| now.set(js_sys::Date::now()),
        UseRafFnOptions::default().immediate(false),
    );
    Effect::new(move |_| {
        if notifier.has_active() {
            resume();
        } else {
            pause();
        }
    });

    view! {
        <div class="fixed right-4 top-16 z-50 flex flex-col gap-2 pointer-events-none">
            <For each=move || notifier.active() key=|toast| toast.id let:toast>
                {
                    let id = toast.id;
                    let shown_at = toast.shown_at;
                    let duration_ms = toast.duration_ms;
                    view! {
                        <div
                            class="relative overflow-hidden rounded-md bg-gray-800 px-4 py-3 text-sm shadow-lg transition-all duration-300"
                            class:opacity-0=move || notifier.is_leaving(id)
                            class:translate-x-4=move || notifier.is_leaving(id)
                        >
                            <span>{toast.message.clone()}</span>
                            <div
                                class="absolute bottom-0 left-0 h-0.5 w-full origin-left bg-teal-400"
                                style:transform=move || {
                                    format!(
                                        "scaleX({})",
                                        crate::notify::progress(shown_at, duration_ms, now.get())
                                    )
                                }
                            ></div>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
