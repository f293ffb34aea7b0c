//! Turns a stream of small angular deltas into whole detent steps.

/// Slack on the step comparison so that a whole number of turns fed in small
/// increments yields the exact number of steps despite rounding.
const STEP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct DetentQuantizer {
    step: f64,
    accum: f64,
}

impl DetentQuantizer {
    pub fn new(detent_degrees: f64) -> Self {
        Self {
            step: detent_degrees.to_radians(),
            accum: 0.0,
        }
    }

    pub fn step_radians(&self) -> f64 {
        self.step
    }

    /// Sub-detent progress carried into the next delta.
    pub fn remainder(&self) -> f64 {
        self.accum
    }

    /// Adds `diff` radians and returns the signed number of detents crossed.
    ///
    /// The sign is flipped relative to the angle: on a y-down screen the angle
    /// grows clockwise, so a counter-clockwise turn reads as a positive advance.
    pub fn feed(&mut self, diff: f64) -> i32 {
        if !diff.is_finite() || self.step <= 0.0 {
            return 0;
        }
        self.accum += diff;

        let mut steps = 0;
        while self.accum >= self.step - STEP_EPSILON {
            steps += 1;
            self.accum -= self.step;
        }
        while self.accum <= -self.step + STEP_EPSILON {
            steps -= 1;
            self.accum += self.step;
        }
        -steps
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn feed_all(q: &mut DetentQuantizer, total: f64, samples: usize) -> i32 {
        let delta = total / samples as f64;
        (0..samples).map(|_| q.feed(delta)).sum()
    }

    #[test]
    fn test_full_turns_conserve_steps() {
        for degrees in [10.0, 15.0, 20.0, 30.0] {
            for turns in 1..=3 {
                let mut q = DetentQuantizer::new(degrees);
                let steps = feed_all(&mut q, TAU * turns as f64, 3600 * turns);
                let expected = (turns as f64 * 360.0 / degrees).round() as i32;
                assert_eq!(steps, -expected, "{degrees} deg, {turns} turns");
                assert!(q.remainder().abs() < q.step_radians());
            }
        }
    }

    #[test]
    fn test_negative_rotation_gives_positive_steps() {
        let mut q = DetentQuantizer::new(15.0);
        let steps = feed_all(&mut q, -TAU, 720);
        assert_eq!(steps, 24);
    }

    #[test]
    fn test_remainder_carries_between_feeds() {
        let mut q = DetentQuantizer::new(15.0);
        let half = 7.5_f64.to_radians();
        assert_eq!(q.feed(half), 0);
        assert!((q.remainder() - half).abs() < 1e-12);
        assert_eq!(q.feed(half), -1);
        assert!(q.remainder().abs() < 1e-9);
    }

    #[test]
    fn test_large_delta_emits_several_steps() {
        let mut q = DetentQuantizer::new(15.0);
        assert_eq!(q.feed(50.0_f64.to_radians()), -3);
        assert!(q.remainder().abs() < q.step_radians());
    }

    #[test]
    fn test_back_and_forth_cancels() {
        let mut q = DetentQuantizer::new(15.0);
        let small = 5.0_f64.to_radians();
        let total: i32 = (0..20).map(|i| q.feed(if i % 2 == 0 { small } else { -small })).sum();
        assert_eq!(total, 0);
    }
}
