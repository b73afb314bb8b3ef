//! Toast notification queue. At most two toasts are visible; everything else
//! waits in FIFO order and is promoted as visible toasts finish their exit
//! animation.

use std::collections::VecDeque;

pub const MAX_VISIBLE: usize = 2;
/// Exit animation length; a toast stays in the active set while it plays.
pub const EXIT_MS: u64 = 400;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub duration_ms: u64,
    /// Wall-clock time the toast became visible, for the progress bar.
    pub shown_at: f64,
    /// Set once the display duration elapsed; the toast is animating out.
    pub leaving: bool,
}

impl Toast {
    /// Remaining fraction of the display duration, 1.0 down to 0.0.
    pub fn progress(&self, now: f64) -> f64 {
        progress(self.shown_at, self.duration_ms, now)
    }
}

/// Remaining display fraction for a toast shown at `shown_at`.
pub fn progress(shown_at: f64, duration_ms: u64, now: f64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    let elapsed = (now - shown_at).max(0.0);
    (1.0 - elapsed / duration_ms as f64).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    active: Vec<Toast>,
    waiting: VecDeque<(u64, String, u64)>,
}

impl ToastQueue {
    /// Adds a toast. Returns the promoted toast when a slot was free, so the
    /// caller can start its display timer.
    pub fn push(&mut self, message: String, duration_ms: u64, now: f64) -> Option<Toast> {
        let id = self.next_id;
        self.next_id += 1;
        self.waiting.push_back((id, message, duration_ms));
        self.promote(now)
    }

    /// Moves the next waiting toast into a free visible slot.
    fn promote(&mut self, now: f64) -> Option<Toast> {
        if self.active.len() >= MAX_VISIBLE {
            return None;
        }
        let (id, message, duration_ms) = self.waiting.pop_front()?;
        let toast = Toast {
            id,
            message,
            duration_ms,
            shown_at: now,
            leaving: false,
        };
        self.active.push(toast.clone());
        Some(toast)
    }

    /// Marks a toast as leaving. The slot frees up only once `remove` runs
    /// after the exit animation.
    pub fn begin_exit(&mut self, id: u64) {
        if let Some(toast) = self.active.iter_mut().find(|t| t.id == id) {
            toast.leaving = true;
        }
    }

    /// Drops a toast and promotes the next waiting one, returning it so the
    /// caller can schedule its timers.
    pub fn remove(&mut self, id: u64, now: f64) -> Option<Toast> {
        self.active.retain(|t| t.id != id);
        self.promote(now)
    }

    pub fn active(&self) -> &[Toast] {
        &self.active
    }

    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(shown: &mut Vec<u64>, promoted: Option<Toast>) {
        if let Some(t) = promoted {
            shown.push(t.id);
        }
    }

    #[test]
    fn at_most_two_visible() {
        let mut q = ToastQueue::default();
        for i in 0..5 {
            q.push(format!("m{i}"), 3000, 0.0);
        }
        assert_eq!(q.active().len(), MAX_VISIBLE);
        assert_eq!(q.waiting_len(), 3);
    }

    #[test]
    fn fifo_promotion() {
        let mut q = ToastQueue::default();
        let a = q.push("a".into(), 1000, 0.0).unwrap();
        let b = q.push("b".into(), 1000, 0.0).unwrap();
        assert!(q.push("c".into(), 1000, 0.0).is_none());
        q.begin_exit(a.id);
        assert_eq!(q.active().len(), 2);
        let c = q.remove(a.id, 1400.0).unwrap();
        assert_eq!(c.message, "c");
        assert_eq!(q.active(), &[b.clone(), c]);
    }

    #[test]
    fn burst_of_five_all_display_exactly_once() {
        // Five toasts of 1000 ms each; slots free up 1400 ms after a toast is
        // shown (duration + exit animation). The third arrival is promoted at
        // ~1400 ms and every toast is shown exactly once.
        let mut q = ToastQueue::default();
        let mut shown = Vec::new();
        for i in 0..5 {
            let p = q.push(format!("m{i}"), 1000, 0.0);
            record(&mut shown, p);
        }
        assert_eq!(shown, vec![0, 1]);

        let mut now = 0.0;
        let mut pending: Vec<(u64, f64)> =
            q.active().iter().map(|t| (t.id, t.shown_at)).collect();
        while let Some((id, shown_at)) = pending.first().copied() {
            pending.remove(0);
            now = f64::max(now, shown_at + 1000.0);
            q.begin_exit(id);
            now += EXIT_MS as f64;
            if let Some(t) = q.remove(id, now) {
                assert_eq!(t.shown_at, now);
                shown.push(t.id);
                pending.push((t.id, t.shown_at));
            }
        }
        assert_eq!(shown, vec![0, 1, 2, 3, 4]);
        assert!(q.active().is_empty());
        assert_eq!(q.waiting_len(), 0);
    }

    #[test]
    fn third_toast_promoted_after_duration_plus_exit() {
        let mut q = ToastQueue::default();
        q.push("a".into(), 1000, 0.0);
        q.push("b".into(), 1000, 0.0);
        q.push("c".into(), 1000, 0.0);
        q.begin_exit(0);
        let c = q.remove(0, 1400.0).unwrap();
        assert_eq!(c.shown_at, 1400.0);
    }

    #[test]
    fn progress_fraction() {
        let t = Toast {
            id: 0,
            message: String::new(),
            duration_ms: 2000,
            shown_at: 1000.0,
            leaving: false,
        };
        assert_eq!(t.progress(1000.0), 1.0);
        assert_eq!(t.progress(2000.0), 0.5);
        assert_eq!(t.progress(4000.0), 0.0);
    }
}
