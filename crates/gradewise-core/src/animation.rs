//! Count-up animation for the revealed CGPA.
//!
//! The core owns no timer. A scheduler calls [`next_display_value`] every
//! [`tick_interval`] until the returned frame is done.

use std::time::Duration;

/// Number of ticks in a full count-up.
pub const TICKS: u32 = 50;

/// Total animation length.
pub const DURATION: Duration = Duration::from_millis(1000);

/// Delay between ticks.
pub fn tick_interval() -> Duration {
    DURATION / TICKS
}

/// One animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub done: bool,
}

/// Advance the displayed value by one fixed increment of `target / TICKS`.
///
/// The value snaps to `target` and the frame is done once it reaches or
/// passes the target, or on the last tick.
pub fn next_display_value(current: f64, target: f64, tick_index: u32) -> Frame {
    let value = current + target / TICKS as f64;
    if value >= target || tick_index + 1 >= TICKS {
        Frame {
            value: target,
            done: true,
        }
    } else {
        Frame { value, done: false }
    }
}

/// Every frame of a count-up from zero to `target`.
pub fn frames(target: f64) -> Vec<Frame> {
    let mut out = Vec::with_capacity(TICKS as usize);
    let mut current = 0.0;
    for tick in 0..TICKS {
        let frame = next_display_value(current, target, tick);
        out.push(frame);
        if frame.done {
            break;
        }
        current = frame.value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_splits_duration_evenly() {
        assert_eq!(tick_interval(), Duration::from_millis(20));
    }

    #[test]
    fn count_up_reaches_target_within_tick_budget() {
        let frames = frames(7.86);
        assert!(frames.len() <= TICKS as usize);
        let last = frames.last().unwrap();
        assert!(last.done);
        assert_eq!(last.value, 7.86);
        assert!(frames[..frames.len() - 1].iter().all(|f| !f.done));
    }

    #[test]
    fn values_never_decrease_or_overshoot() {
        let frames = frames(9.5);
        let mut last = 0.0;
        for f in &frames {
            assert!(f.value >= last);
            assert!(f.value <= 9.5);
            last = f.value;
        }
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames = frames(0.0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], Frame { value: 0.0, done: true });
    }

    #[test]
    fn single_step_from_midway() {
        let frame = next_display_value(5.0, 10.0, 24);
        assert!(!frame.done);
        assert!((frame.value - 5.2).abs() < 1e-9);
    }
}
