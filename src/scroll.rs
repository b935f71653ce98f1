use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

/// Scroll distance, in wheel lines, covering the full [0, 1] offset range.
const SCROLL_LINES_FULL_RANGE: f32 = 100.0;
/// Wheel-line equivalent of one pixel-unit scroll event.
const PIXELS_PER_LINE: f32 = 16.0;

#[derive(Resource, Default)]
/// Normalized scroll position: 0.0 at the top, 1.0 at the bottom.
pub struct ScrollTracker {
    offset: f32,
}

impl ScrollTracker {
    /// Current normalized offset in [0, 1].
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance the offset by a wheel delta measured in lines, clamped.
    pub fn accumulate(&mut self, delta_lines: f32) {
        self.offset = (self.offset + delta_lines / SCROLL_LINES_FULL_RANGE).clamp(0.0, 1.0);
    }
}

/// Feed accumulated wheel input into the scroll tracker.
pub fn scroll_input_system(
    wheel: Res<AccumulatedMouseScroll>,
    mut tracker: ResMut<ScrollTracker>,
) {
    if wheel.delta == Vec2::ZERO {
        return;
    }
    let lines = match wheel.unit {
        MouseScrollUnit::Line => wheel.delta.y,
        MouseScrollUnit::Pixel => wheel.delta.y / PIXELS_PER_LINE,
    };
    // Wheel-down arrives as a negative delta but means scrolling further down.
    tracker.accumulate(-lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify accumulation moves the offset proportionally to line count.
    #[test]
    fn accumulation_is_proportional() {
        let mut tracker = ScrollTracker::default();
        tracker.accumulate(SCROLL_LINES_FULL_RANGE / 2.0);
        assert_eq!(tracker.offset(), 0.5);
    }

    /// Verify the offset clamps at both ends of the range.
    #[test]
    fn offset_clamps_to_unit_range() {
        let mut tracker = ScrollTracker::default();
        tracker.accumulate(-10.0);
        assert_eq!(tracker.offset(), 0.0);
        tracker.accumulate(SCROLL_LINES_FULL_RANGE * 3.0);
        assert_eq!(tracker.offset(), 1.0);
    }
}
