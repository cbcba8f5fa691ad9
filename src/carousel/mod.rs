//! Landing page carousel
//!
//! [`Carousel`] is the pure index/rotation state over a fixed slide sequence
//! and its parallel indicator dots. [`CarouselController`] owns one behind a
//! mutex and drives it from a repeating timer that pauses while the pointer
//! hovers the carousel.

pub mod controller;

pub use controller::{AutoAdvanceHandle, CarouselController};

use crate::utils::errors::{GatePassError, Result};
use crate::utils::logging::log_slide_change;

/// Rotation direction for [`Carousel::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}


/// Current-slide index plus active flags for slides and indicators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    slides: Vec<bool>,
    indicators: Vec<bool>,
}

impl Carousel {
    /// Slide 0 and indicator 0 start active
    pub fn new(slide_count: usize) -> Self {
        let mut slides = vec![false; slide_count];
        let mut indicators = vec![false; slide_count];
        if slide_count > 0 {
            slides[0] = true;
            indicators[0] = true;
        }

        Self {
            index: 0,
            slides,
            indicators,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn active_slides(&self) -> Vec<usize> {
        Self::active(&self.slides)
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        Self::active(&self.indicators)
    }

    fn active(flags: &[bool]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    /// Rotate one slide with wraparound; `None` when there are no slides
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let count = self.slide_count();
        if count == 0 {
            return None;
        }

        let next = match direction {
            Direction::Forward => (self.index + 1) % count,
            Direction::Backward => (self.index + count - 1) % count,
        };
        self.activate(next);
        Some(next)
    }

    /// Show a specific slide; out-of-range indices are rejected, not clamped
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let count = self.slide_count();
        if count == 0 {
            return Ok(());
        }
        if index >= count {
            return Err(GatePassError::SlideOutOfRange {
                index,
                slide_count: count,
            });
        }

        self.activate(index);
        Ok(())
    }

    fn activate(&mut self, next: usize) {
        let previous = self.index;
        self.slides[previous] = false;
        self.indicators[previous] = false;
        self.slides[next] = true;
        self.indicators[next] = true;
        self.index = next;
        log_slide_change(previous, next, self.slide_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_backward_from_zero_wraps_to_last() {
        let mut carousel = Carousel::new(4);
        assert_eq!(carousel.advance(Direction::Backward), Some(3));
        assert_eq!(carousel.active_slides(), vec![3]);
        assert_eq!(carousel.active_indicators(), vec![3]);
    }

    #[test]
    fn test_empty_carousel_is_a_no_op() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.advance(Direction::Forward), None);
        assert!(carousel.jump_to(0).is_ok());
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.active_slides().is_empty());
    }

    #[test]
    fn test_jump_to() {
        let mut carousel = Carousel::new(3);
        carousel.jump_to(2).unwrap();
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.active_slides(), vec![2]);

        assert_matches!(
            carousel.jump_to(3),
            Err(GatePassError::SlideOutOfRange { index: 3, slide_count: 3 })
        );
        assert_eq!(carousel.current_index(), 2);
    }


    proptest! {
        #[test]
        fn prop_full_cycle_returns_to_start(count in 1usize..20) {
            let mut carousel = Carousel::new(count);
            for _ in 0..count {
                carousel.advance(Direction::Forward);
                prop_assert_eq!(carousel.active_slides().len(), 1);
                prop_assert_eq!(carousel.active_indicators().len(), 1);
            }
            prop_assert_eq!(carousel.current_index(), 0);
        }

        #[test]
        fn prop_exactly_one_active_after_any_moves(
            count in 1usize..12,
            moves in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut carousel = Carousel::new(count);
            for forward in moves {
                let direction = if forward { Direction::Forward } else { Direction::Backward };
                carousel.advance(direction);
                let index = carousel.current_index();
                prop_assert!(index < count);
                prop_assert_eq!(carousel.active_slides(), vec![index]);
                prop_assert_eq!(carousel.active_indicators(), vec![index]);
            }
        }
    }
}
