//! Media viewer gesture state machine: tap-to-zoom, elastic panning with
//! momentum, and horizontal swipe navigation with a sliding neighbor image.
//! The machine is fed pointer positions and frame ticks and answers with what
//! the view should do; it never touches the DOM.

/// Pointer travel before a swipe locks to an axis.
pub const AXIS_LOCK_PX: f64 = 15.0;
/// Travel below this on release springs back instead of committing.
pub const SWIPE_DEAD_ZONE_PX: f64 = 50.0;
/// Gap between the outgoing image and the incoming neighbor.
pub const SWIPE_GAP_PX: f64 = 40.0;
/// Commit/dismiss animation length; `finish_transition` runs after it.
pub const SWIPE_ANIM_MS: u64 = 300;
/// Resistance factor for panning past the image bounds.
pub const PAN_ELASTICITY: f64 = 0.8;
pub const MOMENTUM_DECAY: f64 = 0.95;
/// Out-of-bounds displacement damping during the momentum glide.
pub const MOMENTUM_DAMPING: f64 = 0.5;
/// Momentum stops once both velocity components fall to this.
pub const MOMENTUM_STOP: f64 = 0.5;
/// Zoom never goes below 2x even for images larger than the container.
pub const MIN_ZOOM_SCALE: f64 = 2.0;
pub const DOUBLE_TAP_MS: f64 = 300.0;
pub const TAP_SLOP_PX: f64 = 10.0;
/// Chrome auto-hides after this much pointer inactivity on non-touch devices.
pub const UI_HIDE_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub const fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

fn elastic(next: f64, max: f64, elasticity: f64) -> f64 {
    if next > max {
        max + (next - max) * elasticity
    } else if next < -max {
        -max + (next + max) * elasticity
    } else {
        next
    }
}

/// Zoomed-in transform: scale plus a center offset clamped so the image edge
/// never leaves the container edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    pub scale: f64,
    pub offset: Point,
    pub max_offset: Point,
}

/// Computes the zoom transform for a tap at `focal` (relative 0..1 image
/// coordinates). The scale covers the container but is at least 2x, and the
/// tapped point moves toward the container center as far as the bounds allow.
pub fn zoom_at(container: Point, image: Point, focal: Point) -> Zoom {
    let scale = (container.x / image.x)
        .max(container.y / image.y)
        .max(MIN_ZOOM_SCALE);

    let max_offset = point(
        ((image.x * scale - container.x) / 2.0).max(0.0),
        ((image.y * scale - container.y) / 2.0).max(0.0),
    );
    let offset = point(
        clamp((0.5 - focal.x) * image.x * scale, -max_offset.x, max_offset.x),
        clamp((0.5 - focal.y) * image.y * scale, -max_offset.y, max_offset.y),
    );
    Zoom {
        scale,
        offset,
        max_offset,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Mode {
    #[default]
    Idle,
    /// Panning a zoomed image.
    Pan,
    /// Swiping an unzoomed image; axis locks after `AXIS_LOCK_PX`.
    Swipe { axis: Option<Axis>, clone_dir: i8 },
    /// Momentum glide after a pan release.
    Settle,
    /// Commit animation playing; ends with `finish_transition`.
    Transition,
}

/// Neighbor image the view renders beside the main one during a horizontal
/// swipe. `fresh` means the direction just changed and the clone needs a new
/// source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloneFrame {
    pub index: usize,
    pub x: f64,
    pub fresh: bool,
}

/// Per-move instruction for the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Update {
    None,
    Pan { offset: Point, scale: f64 },
    SwipeX { dx: f64, clone: Option<CloneFrame> },
    SwipeY { dy: f64 },
}

/// Instruction produced by a pointer release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    None,
    /// Start the momentum loop; call `settle_frame` each tick.
    Momentum,
    SpringBack,
    /// Slide the main image out to `exit_x`, the clone to zero, and call
    /// `finish_transition` when the animation ends.
    Commit {
        dir: i8,
        exit_x: f64,
        next_index: usize,
    },
    /// Vertical fling past the dead zone closes the viewer.
    Dismiss { down: bool },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerGestures {
    len: usize,
    index: usize,
    zoom: Option<Zoom>,
    mode: Mode,
    start: Point,
    last: Point,
    velocity: Point,
    container_width: f64,
    pending_index: Option<usize>,
    dragged: bool,
}

impl ViewerGestures {
    pub fn new(len: usize, index: usize) -> ViewerGestures {
        ViewerGestures {
            len,
            index: if len == 0 { 0 } else { index.min(len - 1) },
            ..ViewerGestures::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn zoom(&self) -> Option<Zoom> {
        self.zoom
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom.is_some()
    }

    /// A drag, momentum glide or commit animation is in progress; navigation
    /// and zoom toggles are ignored meanwhile.
    pub fn busy(&self) -> bool {
        !matches!(self.mode, Mode::Idle)
    }

    /// The last press/release pair never left the tap slop, so it counts as
    /// a click.
    pub fn was_tap(&self) -> bool {
        !self.dragged
    }

    fn wrapped(&self, from: usize, dir: i8) -> usize {
        (from + self.len).wrapping_add_signed(dir as isize) % self.len
    }

    /// Arrow/keyboard navigation. Returns the new index, or `None` while a
    /// gesture or animation owns the image.
    pub fn change_image(&mut self, dir: i8) -> Option<usize> {
        if self.len <= 1 || self.busy() {
            return None;
        }
        self.zoom = None;
        self.index = self.wrapped(self.index, dir);
        Some(self.index)
    }

    /// Toggles zoom at a focal point. Returns the new zoom state (`Some(None)`
    /// meaning zoomed out), or `None` while busy.
    pub fn toggle_zoom(
        &mut self,
        container: Point,
        image: Point,
        focal: Point,
    ) -> Option<Option<Zoom>> {
        if self.busy() {
            return None;
        }
        self.zoom = match self.zoom {
            None => Some(zoom_at(container, image, focal)),
            Some(_) => None,
        };
        Some(self.zoom)
    }

    /// Pointer down on the image.
    pub fn press(&mut self, pos: Point, container_width: f64) {
        if self.busy() {
            return;
        }
        self.start = pos;
        self.last = pos;
        self.velocity = Point::default();
        self.container_width = container_width;
        self.dragged = false;
        self.mode = if self.zoom.is_some() {
            Mode::Pan
        } else {
            Mode::Swipe {
                axis: None,
                clone_dir: 0,
            }
        };
    }

    /// Pointer move while pressed.
    pub fn motion(&mut self, pos: Point) -> Update {
        match self.mode {
            Mode::Pan => {
                let d = point(pos.x - self.last.x, pos.y - self.last.y);
                if d.x != 0.0 || d.y != 0.0 {
                    self.dragged = true;
                }
                self.velocity = d;
                self.last = pos;

                let Some(zoom) = self.zoom.as_mut() else {
                    return Update::None;
                };
                zoom.offset.x = elastic(zoom.offset.x + d.x, zoom.max_offset.x, PAN_ELASTICITY);
                zoom.offset.y = elastic(zoom.offset.y + d.y, zoom.max_offset.y, PAN_ELASTICITY);
                Update::Pan {
                    offset: zoom.offset,
                    scale: zoom.scale,
                }
            }
            Mode::Swipe { axis, clone_dir } => {
                self.last = pos;
                let dx = pos.x - self.start.x;
                let dy = pos.y - self.start.y;

                let axis = match axis {
                    Some(a) => a,
                    None => {
                        if dx.abs() > AXIS_LOCK_PX {
                            Axis::X
                        } else if dy.abs() > AXIS_LOCK_PX {
                            Axis::Y
                        } else {
                            return Update::None;
                        }
                    }
                };

                match axis {
                    Axis::Y => {
                        self.mode = Mode::Swipe {
                            axis: Some(Axis::Y),
                            clone_dir,
                        };
                        self.dragged = true;
                        Update::SwipeY { dy }
                    }
                    Axis::X => {
                        if self.len <= 1 {
                            self.mode = Mode::Swipe {
                                axis: Some(Axis::X),
                                clone_dir: 0,
                            };
                            return Update::None;
                        }
                        self.dragged = true;

                        let dir: i8 = if dx < 0.0 { -1 } else { 1 };
                        let fresh = clone_dir != dir;
                        self.mode = Mode::Swipe {
                            axis: Some(Axis::X),
                            clone_dir: dir,
                        };

                        // Swiping left (-1) reveals the next image from the
                        // right; swiping right reveals the previous one from
                        // the left.
                        let target = self.wrapped(self.index, -dir);
                        let clone_x = if dir == -1 {
                            self.container_width + dx + SWIPE_GAP_PX
                        } else {
                            -self.container_width + dx - SWIPE_GAP_PX
                        };
                        Update::SwipeX {
                            dx,
                            clone: Some(CloneFrame {
                                index: target,
                                x: clone_x,
                                fresh,
                            }),
                        }
                    }
                }
            }
            _ => Update::None,
        }
    }

    /// Pointer up.
    pub fn release(&mut self, pos: Point) -> Release {
        match self.mode {
            Mode::Pan => {
                if self.dragged {
                    self.mode = Mode::Settle;
                    Release::Momentum
                } else {
                    self.mode = Mode::Idle;
                    Release::None
                }
            }
            Mode::Swipe { axis, clone_dir } => {
                let dx = pos.x - self.start.x;
                let dy = pos.y - self.start.y;
                self.mode = Mode::Idle;

                match axis {
                    Some(Axis::Y) => {
                        if dy.abs() > SWIPE_DEAD_ZONE_PX {
                            Release::Dismiss { down: dy > 0.0 }
                        } else {
                            Release::SpringBack
                        }
                    }
                    Some(Axis::X) => {
                        if dx.abs() < SWIPE_DEAD_ZONE_PX || clone_dir == 0 {
                            Release::SpringBack
                        } else {
                            let next_index = self.wrapped(self.index, -clone_dir);
                            self.pending_index = Some(next_index);
                            self.mode = Mode::Transition;
                            let exit_x = if clone_dir == -1 {
                                -(self.container_width + SWIPE_GAP_PX)
                            } else {
                                self.container_width + SWIPE_GAP_PX
                            };
                            Release::Commit {
                                dir: clone_dir,
                                exit_x,
                                next_index,
                            }
                        }
                    }
                    None => Release::None,
                }
            }
            _ => Release::None,
        }
    }

    /// One momentum frame. Returns the new offset and whether the glide
    /// finished (offset clamped back into bounds).
    pub fn settle_frame(&mut self) -> (Point, bool) {
        let Some(zoom) = self.zoom.as_mut() else {
            self.mode = Mode::Idle;
            return (Point::default(), true);
        };
        if self.mode != Mode::Settle {
            return (zoom.offset, true);
        }

        zoom.offset.x = elastic(
            zoom.offset.x + self.velocity.x,
            zoom.max_offset.x,
            MOMENTUM_DAMPING,
        );
        zoom.offset.y = elastic(
            zoom.offset.y + self.velocity.y,
            zoom.max_offset.y,
            MOMENTUM_DAMPING,
        );
        self.velocity.x *= MOMENTUM_DECAY;
        self.velocity.y *= MOMENTUM_DECAY;

        let done =
            self.velocity.x.abs() <= MOMENTUM_STOP && self.velocity.y.abs() <= MOMENTUM_STOP;
        if done {
            zoom.offset.x = clamp(zoom.offset.x, -zoom.max_offset.x, zoom.max_offset.x);
            zoom.offset.y = clamp(zoom.offset.y, -zoom.max_offset.y, zoom.max_offset.y);
            self.mode = Mode::Idle;
        }
        (zoom.offset, done)
    }

    /// Called when the commit animation ends; applies the pending index.
    pub fn finish_transition(&mut self) -> usize {
        if let Some(next) = self.pending_index.take() {
            self.index = next;
        }
        self.zoom = None;
        self.mode = Mode::Idle;
        self.index
    }

    /// Jumps straight to an image, dropping any gesture in progress. Used by
    /// the thumbnail strip.
    pub fn reset(&mut self, index: usize) {
        *self = ViewerGestures {
            len: self.len,
            index: index.min(self.len.saturating_sub(1)),
            ..ViewerGestures::default()
        };
    }
}

/// Distinguishes single taps from double taps. A single tap only counts once
/// the double-tap window has passed, so its action must be deferred and
/// cancelled when the second tap lands in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapCadence {
    last: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tap {
    Single,
    Double,
}

impl TapCadence {
    pub fn tap(&mut self, now: f64) -> Tap {
        match self.last {
            Some(last) if now - last < DOUBLE_TAP_MS => {
                self.last = None;
                Tap::Double
            }
            _ => {
                self.last = Some(now);
                Tap::Single
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(len: usize, index: usize) -> ViewerGestures {
        let mut g = ViewerGestures::new(len, index);
        g.press(point(100.0, 100.0), 800.0);
        g
    }

    #[test]
    fn index_wraps_both_directions() {
        let mut g = ViewerGestures::new(5, 0);
        assert_eq!(g.change_image(-1), Some(4));
        assert_eq!(g.change_image(1), Some(0));
        assert_eq!(g.change_image(1), Some(1));
    }

    #[test]
    fn single_image_never_navigates() {
        let mut g = ViewerGestures::new(1, 0);
        assert_eq!(g.change_image(1), None);
        assert_eq!(g.change_image(-1), None);
    }

    #[test]
    fn navigation_blocked_during_transition_and_settle() {
        let mut g = pressed(3, 0);
        g.motion(point(20.0, 100.0));
        let released = g.release(point(20.0, 100.0));
        assert!(matches!(released, Release::Commit { .. }));
        assert_eq!(g.change_image(1), None);
        g.finish_transition();
        assert_eq!(g.index(), 1);
        assert_eq!(g.change_image(1), Some(2));
    }

    #[test]
    fn zoom_scale_covers_container_with_floor_of_two() {
        let z = zoom_at(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5));
        assert_eq!(z.scale, 2.0);
        assert_eq!(z.offset, point(0.0, 0.0));
        assert_eq!(z.max_offset, point(200.0, 200.0));

        let wide = zoom_at(point(900.0, 300.0), point(300.0, 300.0), point(0.5, 0.5));
        assert_eq!(wide.scale, 3.0);
    }

    #[test]
    fn zoom_focal_point_clamps_to_bounds() {
        let z = zoom_at(point(800.0, 600.0), point(600.0, 500.0), point(0.25, 0.5));
        // Unclamped offset would be (0.5 - 0.25) * 600 * 2 = 300.
        assert_eq!(z.offset.x, 200.0);
        assert_eq!(z.offset.y, 0.0);
    }

    #[test]
    fn pan_resists_beyond_bounds() {
        let mut g = ViewerGestures::new(3, 0);
        g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5));
        g.press(point(0.0, 0.0), 800.0);
        let update = g.motion(point(250.0, 0.0));
        // 250 px of drag: 200 in bounds plus 50 * 0.8 of elastic overrun.
        match update {
            Update::Pan { offset, scale } => {
                assert_eq!(scale, 2.0);
                assert!((offset.x - 240.0).abs() < 1e-9);
            }
            other => panic!("expected pan, got {other:?}"),
        }
    }

    #[test]
    fn momentum_decays_and_settles_in_bounds() {
        let mut g = ViewerGestures::new(3, 0);
        g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5));
        g.press(point(0.0, 0.0), 800.0);
        g.motion(point(40.0, 0.0));
        assert_eq!(g.release(point(40.0, 0.0)), Release::Momentum);

        let mut frames = 0;
        loop {
            let (offset, done) = g.settle_frame();
            frames += 1;
            assert!(frames < 500, "momentum never settled");
            if done {
                assert!(offset.x <= 200.0 + 1e-9);
                break;
            }
        }
        assert!(!g.busy());
    }

    #[test]
    fn axis_locks_after_fifteen_pixels() {
        let mut g = pressed(3, 0);
        assert_eq!(g.motion(point(110.0, 104.0)), Update::None);
        let update = g.motion(point(120.0, 104.0));
        assert!(matches!(update, Update::SwipeX { .. }));

        let mut g = pressed(3, 0);
        let update = g.motion(point(104.0, 130.0));
        assert!(matches!(update, Update::SwipeY { dy } if dy == 30.0));
    }

    #[test]
    fn swipe_clone_tracks_direction() {
        let mut g = pressed(3, 1);
        let update = g.motion(point(70.0, 100.0));
        match update {
            Update::SwipeX { dx, clone } => {
                assert_eq!(dx, -30.0);
                let clone = clone.unwrap();
                assert!(clone.fresh);
                assert_eq!(clone.index, 2);
                assert_eq!(clone.x, 800.0 - 30.0 + SWIPE_GAP_PX);
            }
            other => panic!("expected swipe, got {other:?}"),
        }
        // Reversing direction swaps the clone to the previous image.
        match g.motion(point(140.0, 100.0)) {
            Update::SwipeX { clone, .. } => {
                let clone = clone.unwrap();
                assert!(clone.fresh);
                assert_eq!(clone.index, 0);
                assert_eq!(clone.x, -800.0 + 40.0 - SWIPE_GAP_PX);
            }
            other => panic!("expected swipe, got {other:?}"),
        }
    }

    #[test]
    fn short_swipe_springs_back() {
        let mut g = pressed(3, 0);
        g.motion(point(70.0, 100.0));
        assert_eq!(g.release(point(70.0, 100.0)), Release::SpringBack);
        assert_eq!(g.index(), 0);
        assert!(!g.busy());
    }

    #[test]
    fn long_swipe_commits_to_neighbor() {
        let mut g = pressed(3, 0);
        g.motion(point(40.0, 100.0));
        match g.release(point(40.0, 100.0)) {
            Release::Commit {
                dir,
                exit_x,
                next_index,
            } => {
                assert_eq!(dir, -1);
                assert_eq!(next_index, 1);
                assert_eq!(exit_x, -(800.0 + SWIPE_GAP_PX));
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert_eq!(g.finish_transition(), 1);
    }

    #[test]
    fn vertical_swipe_past_dead_zone_dismisses() {
        let mut g = pressed(3, 0);
        g.motion(point(100.0, 180.0));
        assert_eq!(g.release(point(100.0, 180.0)), Release::Dismiss { down: true });

        let mut g = pressed(3, 0);
        g.motion(point(100.0, 130.0));
        assert_eq!(g.release(point(100.0, 130.0)), Release::SpringBack);
    }

    #[test]
    fn tap_without_movement_counts_as_click() {
        let mut g = pressed(3, 0);
        assert_eq!(g.release(point(100.0, 100.0)), Release::None);
        assert!(g.was_tap());

        let mut g = pressed(3, 0);
        g.motion(point(170.0, 100.0));
        g.release(point(170.0, 100.0));
        assert!(!g.was_tap());
    }

    #[test]
    fn zoomed_tap_releases_to_idle() {
        let mut g = ViewerGestures::new(3, 0);
        g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5));
        g.press(point(100.0, 100.0), 800.0);
        assert_eq!(g.release(point(100.0, 100.0)), Release::None);
        assert!(!g.busy());
        assert!(g.was_tap());
        // The follow-up click can zoom back out immediately.
        assert_eq!(
            g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5)),
            Some(None)
        );
    }

    #[test]
    fn zoom_toggle_blocked_while_busy() {
        let mut g = pressed(3, 0);
        g.motion(point(30.0, 100.0));
        g.release(point(30.0, 100.0));
        assert!(g.busy());
        assert_eq!(
            g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5)),
            None
        );
    }

    #[test]
    fn reset_jumps_and_drops_gesture_state() {
        let mut g = pressed(5, 0);
        g.motion(point(30.0, 100.0));
        g.toggle_zoom(point(800.0, 600.0), point(600.0, 500.0), point(0.5, 0.5));
        g.reset(3);
        assert_eq!(g.index(), 3);
        assert!(!g.busy());
        assert!(!g.is_zoomed());
        // Out-of-range input clamps to the last image.
        g.reset(99);
        assert_eq!(g.index(), 4);
    }

    #[test]
    fn second_tap_within_window_is_a_double() {
        let mut taps = TapCadence::default();
        assert_eq!(taps.tap(1000.0), Tap::Single);
        assert_eq!(taps.tap(1250.0), Tap::Double);
        // The window resets after a double: a third tap starts over.
        assert_eq!(taps.tap(1400.0), Tap::Single);
        // And taps spaced past the window never pair up.
        assert_eq!(taps.tap(1400.0 + DOUBLE_TAP_MS), Tap::Single);
    }
}
