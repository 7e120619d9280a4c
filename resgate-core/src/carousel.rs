//! Slide index logic for the hero carousel. The 5-second auto-advance timer
//! itself lives in the web crate; everything here is plain arithmetic.

/// Fixed auto-advance period.
pub const AUTO_ADVANCE_MS: u32 = 5000;
/// Minimum horizontal displacement for a touch gesture to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Prev,
    Next,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "carousel needs at least one slide");
        Carousel { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn prev(&mut self) {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
    }

    /// Indicator/step clicks jump straight to a slide; anything outside the
    /// range wraps the same way next/prev do.
    pub fn goto(&mut self, index: usize) {
        self.index = if index >= self.len { 0 } else { index };
    }

    /// Numbered progress markers: everything before the current slide is
    /// completed, the current one is active.
    pub fn step_state(&self, step: usize) -> StepState {
        if step < self.index {
            StepState::Completed
        } else if step == self.index {
            StepState::Active
        } else {
            StepState::Upcoming
        }
    }

    /// Connecting lines light up behind the current step.
    pub fn line_active(&self, line: usize) -> bool {
        line < self.index
    }

    pub fn apply_swipe(&mut self, action: SwipeAction) {
        match action {
            SwipeAction::Prev => self.prev(),
            SwipeAction::Next => self.next(),
        }
    }
}

/// Interprets the horizontal displacement between touch-start and touch-end.
/// Rightward beyond the threshold goes back, leftward advances, anything
/// smaller is ignored.
pub fn swipe(delta_x: f64) -> Option<SwipeAction> {
    if delta_x > SWIPE_THRESHOLD_PX {
        Some(SwipeAction::Prev)
    } else if delta_x < -SWIPE_THRESHOLD_PX {
        Some(SwipeAction::Next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_prev_wrap() {
        let mut carousel = Carousel::new(4);
        carousel.prev();
        assert_eq!(carousel.index(), 3);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        for _ in 0..9 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn test_goto_wraps_out_of_range() {
        let mut carousel = Carousel::new(3);
        carousel.goto(2);
        assert_eq!(carousel.index(), 2);
        carousel.goto(7);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_index_stays_in_bounds_under_any_sequence() {
        let mut carousel = Carousel::new(4);
        let moves: [&dyn Fn(&mut Carousel); 5] = [
            &|c| c.next(),
            &|c| c.prev(),
            &|c| c.goto(3),
            &|c| c.apply_swipe(SwipeAction::Next),
            &|c| c.apply_swipe(SwipeAction::Prev),
        ];
        for i in 0..100 {
            moves[i % moves.len()](&mut carousel);
            assert!(carousel.index() < carousel.len());
        }
    }

    #[test]
    fn test_step_states() {
        let mut carousel = Carousel::new(4);
        carousel.goto(2);
        assert_eq!(carousel.step_state(0), StepState::Completed);
        assert_eq!(carousel.step_state(1), StepState::Completed);
        assert_eq!(carousel.step_state(2), StepState::Active);
        assert_eq!(carousel.step_state(3), StepState::Upcoming);
        assert!(carousel.line_active(1));
        assert!(!carousel.line_active(2));
    }

    #[test]
    fn test_swipe_threshold() {
        assert_eq!(swipe(80.0), Some(SwipeAction::Prev));
        assert_eq!(swipe(-80.0), Some(SwipeAction::Next));
        assert_eq!(swipe(50.0), None);
        assert_eq!(swipe(-50.0), None);
        assert_eq!(swipe(0.0), None);
    }
}
