//! Entrance reveal timing: staggered delays for section blocks, the
//! education timeline and the project grid. The components only flip a
//! mounted flag; all scheduling lives in the transition delays computed
//! here.

/// Shared easing curve for entrance transitions.
pub const EASE: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// The full timeline dot sweep always takes this long, however many dots.
pub const TIMELINE_TOTAL_MS: u64 = 700;
/// Delay between consecutive section blocks sliding in.
pub const BLOCK_STEP_MS: u64 = 120;
/// Delay between consecutive project cards.
pub const CARD_STEP_MS: u64 = 80;
/// Delay between consecutive social rows.
pub const ROW_STEP_MS: u64 = 80;

/// Per-dot interval: dots share `TIMELINE_TOTAL_MS` evenly.
pub fn timeline_step_ms(dots: usize) -> u64 {
    if dots == 0 {
        return 0;
    }
    TIMELINE_TOTAL_MS / dots as u64
}

/// When dot `i` starts fading in.
pub fn timeline_dot_delay_ms(i: usize, dots: usize) -> u64 {
    i as u64 * timeline_step_ms(dots)
}

/// Connecting lines draw only after every dot has appeared.
pub fn timeline_line_delay_ms(dots: usize) -> u64 {
    dots as u64 * timeline_step_ms(dots)
}

pub fn block_delay_ms(order: usize) -> u64 {
    order as u64 * BLOCK_STEP_MS
}

pub fn card_delay_ms(order: usize) -> u64 {
    order as u64 * CARD_STEP_MS
}

pub fn row_delay_ms(order: usize) -> u64 {
    order as u64 * ROW_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_sweep_fills_the_total_window() {
        assert_eq!(timeline_step_ms(2), 350);
        assert_eq!(timeline_dot_delay_ms(0, 2), 0);
        assert_eq!(timeline_dot_delay_ms(1, 2), 350);
        // The last dot finishes exactly when the lines begin.
        assert_eq!(timeline_line_delay_ms(2), TIMELINE_TOTAL_MS);

        assert_eq!(timeline_step_ms(7), 100);
        assert_eq!(timeline_dot_delay_ms(6, 7), 600);
    }

    #[test]
    fn no_dots_means_no_delay() {
        assert_eq!(timeline_step_ms(0), 0);
        assert_eq!(timeline_dot_delay_ms(0, 0), 0);
        assert_eq!(timeline_line_delay_ms(0), 0);
    }

    #[test]
    fn staggers_grow_monotonically() {
        assert_eq!(block_delay_ms(0), 0);
        assert_eq!(block_delay_ms(2), 240);
        assert_eq!(card_delay_ms(3), 240);
        assert_eq!(row_delay_ms(1), 80);
    }
}
