use gloo_timers::callback::Timeout;
use leptos::{ev, html, prelude::*};
use leptos_use::{use_document, use_event_listener, use_raf_fn};

use crate::scrollbar::{self, ScrollMetrics, SmoothScroll, Thumb};

use super::track::Platform;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

fn set_scroll(el: &web_sys::HtmlDivElement, axis: ScrollAxis, value: f64) {
    match axis {
        ScrollAxis::Vertical => el.set_scroll_top(value.round() as i32),
        ScrollAxis::Horizontal => el.set_scroll_left(value.round() as i32),
    }
}

/// Overlay scrollbar for a scrollable container. Replaces the native bar:
/// proportional draggable thumb, track clicks jump, wheel input eases with
/// per-frame smoothing on non-touch devices, and the whole thing fades out
/// when idle.
#[component]
pub fn CustomScrollbar(
    content: NodeRef<html::Div>,
    #[prop(optional)] axis: ScrollAxis,
    #[prop(default = scrollbar::MIN_THUMB_PX)] min_thumb: f64,
    #[prop(default = scrollbar::HIDE_MS)] hide_after_ms: u64,
) -> impl IntoView {
    let platform = expect_context::<Platform>();
    let track_ref = NodeRef::<html::Div>::new();
    let thumb_ref = NodeRef::<html::Div>::new();

    let thumb_state = RwSignal::new(None::<Thumb>);
    let visible = RwSignal::new(false);
    let dragging = RwSignal::new(false);
    let hovering = RwSignal::new(false);
    let drag_origin = StoredValue::new((0.0_f64, 0.0_f64));
    let smooth = StoredValue::new(SmoothScroll::default());
    let last_scroll = StoredValue::new(0.0_f64);
    let hide_timer = StoredValue::new_local(None::<Timeout>);

    let read = move || -> Option<(ScrollMetrics, f64)> {
        let el = content.get_untracked()?;
        let track = track_ref
            .get_untracked()
            .map(|t| match axis {
                ScrollAxis::Vertical => t.client_height() as f64,
                ScrollAxis::Horizontal => t.client_width() as f64,
            })
            .unwrap_or(0.0);
        let (content_len, viewport, scroll) = match axis {
            ScrollAxis::Vertical => (
                el.scroll_height() as f64,
                el.client_height() as f64,
                el.scroll_top() as f64,
            ),
            ScrollAxis::Horizontal => (
                el.scroll_width() as f64,
                el.client_width() as f64,
                el.scroll_left() as f64,
            ),
        };
        Some((
            ScrollMetrics {
                content: content_len,
                viewport,
                track,
            },
            scroll,
        ))
    };

    let show = move || {
        visible.set(true);
        hide_timer.set_value(Some(Timeout::new(hide_after_ms as u32, move || {
            if scrollbar::auto_hide_allowed(dragging.get_untracked(), hovering.get_untracked()) {
                visible.set(false);
            }
        })));
    };

    // Frame loop: apply wheel smoothing, follow external scrolling, keep the
    // thumb geometry current.
    let _ = use_raf_fn(move |_| {
        let Some((metrics, actual)) = read() else {
            return;
        };

        let mut scroll = actual;
        if !platform.touch.get_untracked() && !dragging.get_untracked() {
            smooth.update_value(|s| {
                if s.settled() {
                    if s.current != actual {
                        s.sync(actual);
                    }
                } else {
                    scroll = s.step();
                    if let Some(el) = content.get_untracked() {
                        set_scroll(&el, axis, scroll);
                    }
                }
            });
        }

        if (scroll - last_scroll.get_value()).abs() > 0.5 {
            last_scroll.set_value(scroll);
            show();
        }

        let next = scrollbar::thumb(metrics, scroll, min_thumb);
        if thumb_state.get_untracked() != next {
            thumb_state.set(next);
        }
    });

    let _ = use_event_listener(content, ev::wheel, move |ev: web_sys::WheelEvent| {
        if platform.touch.get_untracked() {
            return;
        }
        let Some((metrics, actual)) = read() else {
            return;
        };
        if metrics.max_scroll() <= 0.0 {
            return;
        }
        ev.prevent_default();
        smooth.update_value(|s| {
            if s.settled() && s.current != actual {
                s.sync(actual);
            }
            s.wheel(ev.delta_y(), metrics);
        });
        show();
    });

    let _ = use_event_listener(thumb_ref, ev::mousedown, move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let Some((_, actual)) = read() else {
            return;
        };
        let pos = match axis {
            ScrollAxis::Vertical => ev.client_y() as f64,
            ScrollAxis::Horizontal => ev.client_x() as f64,
        };
        dragging.set(true);
        drag_origin.set_value((pos, actual));
        show();
    });

    let _ = use_event_listener(track_ref, ev::mousedown, move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let Some((metrics, _)) = read() else {
            return;
        };
        let (Some(thumb), Some(track_el)) = (thumb_state.get_untracked(), track_ref.get_untracked())
        else {
            return;
        };
        let rect = track_el.get_bounding_client_rect();
        let click = match axis {
            ScrollAxis::Vertical => ev.client_y() as f64 - rect.top(),
            ScrollAxis::Horizontal => ev.client_x() as f64 - rect.left(),
        };
        let next = scrollbar::track_click_scroll(metrics, thumb.size, click);
        if let Some(el) = content.get_untracked() {
            set_scroll(&el, axis, next);
        }
        smooth.update_value(|s| {
            s.sync(next);
        });
        show();
    });

    let _ = use_event_listener(use_document(), ev::mousemove, move |ev: web_sys::MouseEvent| {
        if !dragging.get_untracked() {
            return;
        }
        let Some((metrics, _)) = read() else {
            return;
        };
        let Some(thumb) = thumb_state.get_untracked() else {
            return;
        };
        let pos = match axis {
            ScrollAxis::Vertical => ev.client_y() as f64,
            ScrollAxis::Horizontal => ev.client_x() as f64,
        };
        let (start_pos, start_scroll) = drag_origin.get_value();
        let next = scrollbar::drag_scroll(metrics, thumb.size, start_scroll, pos - start_pos);
        if let Some(el) = content.get_untracked() {
            set_scroll(&el, axis, next);
        }
        smooth.update_value(|s| s.sync(next));
        show();
    });

    let _ = use_event_listener(use_document(), ev::mouseup, move |_| {
        if dragging.get_untracked() {
            dragging.set(false);
            show();
        }
    });

    let _ = use_event_listener(track_ref, ev::mouseenter, move |_| {
        hovering.set(true);
    });

    let _ = use_event_listener(track_ref, ev::mouseleave, move |_| {
        hovering.set(false);
        // Restart the countdown the hover suppressed.
        show();
    });

    let track_class = move || {
        let base = match axis {
            ScrollAxis::Vertical => "absolute top-0 right-0 bottom-0 w-1.5",
            ScrollAxis::Horizontal => "absolute left-0 right-0 bottom-0 h-1.5",
        };
        let state = if visible.get() && thumb_state.get().is_some() {
            "opacity-100"
        } else {
            "opacity-0 pointer-events-none"
        };
        format!("{base} transition-opacity duration-300 {state}")
    };

    let thumb_style = move || {
        let Some(thumb) = thumb_state.get() else {
            return String::new();
        };
        match axis {
            ScrollAxis::Vertical => format!(
                "top: {}px; height: {}px; left: 0; right: 0;",
                thumb.offset, thumb.size
            ),
            ScrollAxis::Horizontal => format!(
                "left: {}px; width: {}px; top: 0; bottom: 0;",
                thumb.offset, thumb.size
            ),
        }
    };

    view! {
        <div node_ref=track_ref class=track_class>
            <div
                node_ref=thumb_ref
                class="absolute rounded-full bg-gray-500/70 hover:bg-gray-400"
                style=thumb_style
            ></div>
        </div>
    }
}
