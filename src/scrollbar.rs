//! Custom scrollbar math: thumb geometry, drag and track-click mapping, and
//! the exponential smoothing used for wheel scrolling on non-touch devices.
//! The DOM wiring lives in the app layer; everything here is testable
//! arithmetic.

/// Minimum thumb size for section and overlay scrollbars.
pub const MIN_THUMB_PX: f64 = 30.0;
/// Minimum thumb size for the chat transcript scrollbar.
pub const MIN_THUMB_CHAT_PX: f64 = 24.0;
/// Fraction of the remaining distance covered per animation frame.
pub const SMOOTHING: f64 = 0.2;
/// Idle delay before a scrollbar fades out.
pub const HIDE_MS: u64 = 1000;
/// Idle delay for scrollbars that should linger (overlay content).
pub const HIDE_LONG_MS: u64 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Total scrollable content size along the axis.
    pub content: f64,
    /// Visible viewport size along the axis.
    pub viewport: f64,
    /// Track length available to the thumb.
    pub track: f64,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f64 {
        (self.content - self.viewport).max(0.0)
    }

    pub fn clamp_scroll(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max_scroll())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thumb {
    pub size: f64,
    pub offset: f64,
}

/// Thumb size and position for a scroll offset. `None` when the content fits
/// and the scrollbar should be hidden entirely.
pub fn thumb(metrics: ScrollMetrics, scroll: f64, min_thumb: f64) -> Option<Thumb> {
    if metrics.content <= metrics.viewport || metrics.track <= 0.0 {
        return None;
    }
    let size = (metrics.viewport / metrics.content * metrics.track)
        .max(min_thumb)
        .min(metrics.track);
    let max_offset = metrics.track - size;
    let max_scroll = metrics.max_scroll();
    let offset = if max_scroll > 0.0 {
        (metrics.clamp_scroll(scroll) / max_scroll) * max_offset
    } else {
        0.0
    };
    Some(Thumb { size, offset })
}

/// Scroll offset for a thumb drag: the pointer delta maps proportionally from
/// thumb travel to content travel.
pub fn drag_scroll(metrics: ScrollMetrics, thumb_size: f64, start_scroll: f64, delta: f64) -> f64 {
    let max_offset = metrics.track - thumb_size;
    if max_offset <= 0.0 {
        return metrics.clamp_scroll(start_scroll);
    }
    metrics.clamp_scroll(start_scroll + (delta / max_offset) * metrics.max_scroll())
}

/// Whether the auto-hide timer may fade the bar out: never mid-drag and
/// never while the pointer hovers the track.
pub fn auto_hide_allowed(dragging: bool, hovering: bool) -> bool {
    !dragging && !hovering
}

/// Scroll offset that centers the thumb on a click position along the track.
pub fn track_click_scroll(metrics: ScrollMetrics, thumb_size: f64, click: f64) -> f64 {
    let max_offset = metrics.track - thumb_size;
    if max_offset <= 0.0 {
        return 0.0;
    }
    let offset = (click - thumb_size / 2.0).clamp(0.0, max_offset);
    (offset / max_offset) * metrics.max_scroll()
}

/// Wheel scrolling state with per-frame exponential smoothing. The target
/// moves immediately on wheel input; `step` eases the current position toward
/// it each animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothScroll {
    pub current: f64,
    pub target: f64,
}

impl SmoothScroll {
    pub fn sync(&mut self, actual: f64) {
        self.current = actual;
        self.target = actual;
    }

    pub fn wheel(&mut self, delta: f64, metrics: ScrollMetrics) {
        self.target = metrics.clamp_scroll(self.target + delta);
    }

    pub fn jump(&mut self, target: f64, metrics: ScrollMetrics) {
        self.target = metrics.clamp_scroll(target);
    }

    /// Advances one frame. Returns the new position; snaps when the gap drops
    /// under half a pixel so the loop can settle.
    pub fn step(&mut self) -> f64 {
        let gap = self.target - self.current;
        if gap.abs() < 0.5 {
            self.current = self.target;
        } else {
            self.current += gap * SMOOTHING;
        }
        self.current
    }

    pub fn settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: ScrollMetrics = ScrollMetrics {
        content: 2000.0,
        viewport: 500.0,
        track: 500.0,
    };

    #[test]
    fn thumb_hidden_when_content_fits() {
        let fits = ScrollMetrics {
            content: 400.0,
            viewport: 500.0,
            track: 500.0,
        };
        assert_eq!(thumb(fits, 0.0, MIN_THUMB_PX), None);
    }

    #[test]
    fn thumb_proportional_with_minimum() {
        let t = thumb(METRICS, 0.0, MIN_THUMB_PX).unwrap();
        assert_eq!(t.size, 125.0);
        assert_eq!(t.offset, 0.0);

        let long = ScrollMetrics {
            content: 50_000.0,
            viewport: 500.0,
            track: 500.0,
        };
        let t = thumb(long, 0.0, MIN_THUMB_PX).unwrap();
        assert_eq!(t.size, MIN_THUMB_PX);
    }

    #[test]
    fn thumb_reaches_track_end_at_max_scroll() {
        let t = thumb(METRICS, METRICS.max_scroll(), MIN_THUMB_PX).unwrap();
        assert!((t.offset + t.size - METRICS.track).abs() < 1e-9);
        // Overscroll input clamps.
        let t2 = thumb(METRICS, 99_999.0, MIN_THUMB_PX).unwrap();
        assert_eq!(t.offset, t2.offset);
    }

    #[test]
    fn drag_maps_thumb_travel_to_content_travel() {
        // Thumb 125 px in a 500 px track leaves 375 px of travel for 1500 px
        // of scroll; 37.5 px of drag is a tenth of that.
        let scroll = drag_scroll(METRICS, 125.0, 0.0, 37.5);
        assert!((scroll - 150.0).abs() < 1e-9);
        assert_eq!(drag_scroll(METRICS, 125.0, 1400.0, 10_000.0), 1500.0);
        assert_eq!(drag_scroll(METRICS, 125.0, 100.0, -10_000.0), 0.0);
    }

    #[test]
    fn track_click_centers_thumb() {
        let scroll = track_click_scroll(METRICS, 125.0, 250.0);
        let t = thumb(METRICS, scroll, MIN_THUMB_PX).unwrap();
        assert!((t.offset + t.size / 2.0 - 250.0).abs() < 1e-9);
        // Clicks near the edges clamp.
        assert_eq!(track_click_scroll(METRICS, 125.0, 0.0), 0.0);
        assert_eq!(track_click_scroll(METRICS, 125.0, 500.0), 1500.0);
    }

    #[test]
    fn hover_and_drag_both_block_auto_hide() {
        assert!(auto_hide_allowed(false, false));
        assert!(!auto_hide_allowed(true, false));
        assert!(!auto_hide_allowed(false, true));
        assert!(!auto_hide_allowed(true, true));
    }

    #[test]
    fn smoothing_converges_on_target() {
        let mut s = SmoothScroll::default();
        s.wheel(100.0, METRICS);
        let first = s.step();
        assert!((first - 20.0).abs() < 1e-9);
        let mut frames = 0;
        while !s.settled() {
            s.step();
            frames += 1;
            assert!(frames < 100, "smoothing failed to settle");
        }
        assert_eq!(s.current, 100.0);
    }

    #[test]
    fn wheel_target_clamps_to_bounds() {
        let mut s = SmoothScroll::default();
        s.wheel(-300.0, METRICS);
        assert_eq!(s.target, 0.0);
        s.wheel(9_999.0, METRICS);
        assert_eq!(s.target, METRICS.max_scroll());
    }
}
