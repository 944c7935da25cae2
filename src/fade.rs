// Time-bounded fades driven by the frame loop's `dt`.

use std::time::Duration;

/// Tracks progress through a fade of fixed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
}

impl Fade {
    pub fn new(duration: Duration) -> Self {
        Self { elapsed: Duration::ZERO, duration }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Linear progress (0.0 = start, 1.0 = complete).
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Ease-out cubic: fast start, slow finish.
    pub fn eased(&self) -> f32 {
        let t = self.progress();
        1.0 - (1.0 - t).powi(3)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// What happens after a cover reveal: fade opacity out, then clear the raster once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFade {
    fade: Fade,
    cleared: bool,
}

/// Result of stepping a `RevealFade`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub opacity: f32,
    /// True exactly once: on the step where the fade completes.
    pub clear_now: bool,
}

impl RevealFade {
    pub fn new(duration: Duration) -> Self {
        Self { fade: Fade::new(duration), cleared: false }
    }

    pub fn step(&mut self, dt: Duration) -> RevealStep {
        self.fade.advance(dt);
        let clear_now = self.fade.is_complete() && !self.cleared;
        if clear_now {
            self.cleared = true;
        }
        RevealStep { opacity: 1.0 - self.fade.eased(), clear_now }
    }

    pub fn is_finished(&self) -> bool {
        self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut f = Fade::new(Duration::from_millis(100));
        f.advance(Duration::from_millis(250));
        assert_eq!(f.progress(), 1.0);
        assert!(f.is_complete());
    }

    #[test]
    fn zero_length_fade_is_already_complete() {
        let f = Fade::new(Duration::ZERO);
        assert!(f.is_complete());
        assert_eq!(f.eased(), 1.0);
    }

    #[test]
    fn opacity_decreases_then_clears_once() {
        let mut r = RevealFade::new(Duration::from_secs(1));
        let a = r.step(Duration::from_millis(300));
        let b = r.step(Duration::from_millis(300));
        assert!(a.opacity > b.opacity);
        assert!(!a.clear_now && !b.clear_now);
        let c = r.step(Duration::from_millis(500));
        assert!(c.clear_now);
        assert_eq!(c.opacity, 0.0);
        let d = r.step(Duration::from_millis(500));
        assert!(!d.clear_now);
        assert!(r.is_finished());
    }
}
