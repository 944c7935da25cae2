// The scratch card component.
//
// Owns the covering surface, the `CoverState`, and the pending reveal fade.
// Every handler runs synchronously: erase, measure and threshold check all
// happen inside the same call, so there is no window for stale coverage.

use crate::config::Config;
use crate::fade::RevealFade;
use crate::input::InputEvent;
use crate::pattern::{CoverPattern, CoverStyle};
use crate::state::{Command, CoverState, Input, Phase};
use crate::surface::{RasterSurface, Surface};
use crate::types::{Bounds, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

pub struct ScratchCard<S: Surface = RasterSurface> {
    config: Config,
    style: CoverStyle,
    surface: S,
    state: CoverState,
    opacity: f32,
    fade: Option<RevealFade>,
    rng: StdRng,
}

impl ScratchCard<RasterSurface> {
    /// A card with an in-memory raster. Nothing is allocated until the first `resize`.
    pub fn new(config: Config) -> Self {
        Self::with_surface(config, RasterSurface::default(), StdRng::from_entropy())
    }

    /// Same as `new`, with a fixed noise seed.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_surface(config, RasterSurface::default(), StdRng::seed_from_u64(seed))
    }
}

impl<S: Surface> ScratchCard<S> {
    pub fn with_surface(config: Config, surface: S, rng: StdRng) -> Self {
        let style = CoverStyle::from_config(&config);
        Self {
            config,
            style,
            surface,
            state: CoverState::default(),
            opacity: 1.0,
            fade: None,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> CoverState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn coverage_percent(&self) -> f32 {
        self.state.coverage_percent
    }

    pub fn is_revealed(&self) -> bool {
        self.state.revealed
    }

    /// Opacity (0..1) the cover should be composited with.
    /// Visual: 1.0 is solid gold, it eases toward 0.0 over the reveal fade.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True while the reveal fade is running or its clear is still pending.
    pub fn is_fading(&self) -> bool {
        self.fade.is_some_and(|f| !f.is_finished())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Container size changed (or first mount): reallocate and repaint the cover.
    /// Partial erasure is lost. A revealed card stays revealed and unobstructed.
    /// Visual: an unrevealed card shows a fresh, unscratched cover at the new size;
    /// a revealed one shows only the artwork, even mid-fade.
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!("card resize to {width}x{height}");
        self.surface.resize(width, height);
        self.paint_cover();
        if self.state.revealed {
            // The fade keeps running; its later clear repeats this one harmlessly.
            self.surface.clear();
        } else {
            self.state = CoverState::default();
        }
    }

    /// Visual: a press scratches one disk under the pointer right away.
    pub fn handle_start(&mut self, p: Point) {
        self.apply(Input::Start(p));
    }

    /// Visual: dragging leaves a trail of disks, one per move sample.
    pub fn handle_move(&mut self, p: Point) {
        self.apply(Input::Move(p));
    }

    pub fn handle_end(&mut self) {
        self.apply(Input::End);
    }

    /// Visual: the gold comes back at full opacity with new noise.
    pub fn reset(&mut self) {
        self.apply(Input::Reset);
    }

    /// Map a raw event through the card's on-screen bounds and dispatch it.
    pub fn handle_input(&mut self, event: &InputEvent, bounds: &Bounds) {
        match event {
            InputEvent::PointerDown(_) | InputEvent::TouchStart(_) => {
                if let Some(p) = event.local_point(bounds) {
                    self.handle_start(p);
                }
            }
            InputEvent::PointerMove(_) | InputEvent::TouchMove(_) => {
                if let Some(p) = event.local_point(bounds) {
                    self.handle_move(p);
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => self.handle_end(),
        }
    }

    /// Advance the reveal fade; clears the surface once when it completes.
    /// Visual: the remaining gold dims frame by frame, then vanishes.
    pub fn tick(&mut self, dt: Duration) {
        let Some(fade) = self.fade.as_mut() else { return };
        if fade.is_finished() {
            return;
        }
        let step = fade.step(dt);
        self.opacity = step.opacity;
        if step.clear_now {
            log::debug!("reveal fade complete, clearing cover");
            self.surface.clear();
        }
    }

    fn apply(&mut self, input: Input) {
        let threshold = self.config.reveal_threshold_percent;
        let (next, command) = self.state.transition(input, threshold);
        self.state = next;
        match command {
            Some(Command::Erase(p)) => self.scratch(p),
            Some(Command::BeginReveal) => self.begin_reveal(),
            Some(Command::Repaint) => self.restore(),
            None => {}
        }
    }

    fn scratch(&mut self, p: Point) {
        if !self.surface.is_ready() {
            return;
        }
        self.surface.erase(p.x, p.y, self.config.brush_radius);
        if let Some(percent) = self.surface.coverage() {
            self.apply(Input::Measured(percent));
        }
    }

    fn begin_reveal(&mut self) {
        log::info!(
            "revealed at {:.1}% (threshold {:.1}%)",
            self.state.coverage_percent, self.config.reveal_threshold_percent
        );
        self.fade = Some(RevealFade::new(self.config.fade_duration()));
    }

    fn restore(&mut self) {
        log::debug!("reset: repainting cover");
        self.fade = None;
        self.opacity = 1.0;
        self.paint_cover();
    }

    fn paint_cover(&mut self) {
        let (w, h) = self.surface.size();
        if w == 0 || h == 0 {
            return;
        }
        let pattern = CoverPattern::generate(w, h, &self.style, &mut self.rng);
        self.surface.fill(&pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts calls instead of touching pixels; coverage is scripted.
    #[derive(Default)]
    struct FakeSurface {
        size: (usize, usize),
        coverage: f32,
        per_erase: f32,
        erases: usize,
        fills: usize,
        clears: usize,
    }

    impl Surface for FakeSurface {
        fn size(&self) -> (usize, usize) {
            self.size
        }
        fn resize(&mut self, width: usize, height: usize) {
            self.size = (width, height);
            self.coverage = 100.0;
        }
        fn fill(&mut self, _pattern: &CoverPattern) {
            self.fills += 1;
            self.coverage = 0.0;
        }
        fn erase(&mut self, _x: f32, _y: f32, _radius: f32) {
            self.erases += 1;
            self.coverage = (self.coverage + self.per_erase).min(100.0);
        }
        fn clear(&mut self) {
            self.clears += 1;
            self.coverage = 100.0;
        }
        fn coverage(&self) -> Option<f32> {
            self.is_ready().then_some(self.coverage)
        }
    }

    fn fake_card(per_erase: f32) -> ScratchCard<FakeSurface> {
        let surface = FakeSurface { per_erase, ..Default::default() };
        let mut card = ScratchCard::with_surface(Config::default(), surface, StdRng::seed_from_u64(0));
        card.resize(100, 100);
        card
    }

    const P: Point = Point::new(10.0, 10.0);

    #[test]
    fn reveal_side_effects_scheduled_once() {
        let mut card = fake_card(10.0);
        card.handle_start(P);
        for _ in 0..20 {
            card.handle_move(P);
        }
        assert!(card.is_revealed());
        // revealed on the 8th erase (80% > 70%), nothing after that
        assert_eq!(card.surface().erases, 8);
        assert_eq!(card.coverage_percent(), 80.0);
        assert!(card.is_fading());

        card.tick(Duration::from_millis(600));
        assert_eq!(card.surface().clears, 0);
        card.tick(Duration::from_millis(600));
        card.tick(Duration::from_millis(600));
        assert_eq!(card.surface().clears, 1);
        assert_eq!(card.opacity(), 0.0);
        assert!(!card.is_fading());
    }

    #[test]
    fn uninitialized_surface_is_a_no_op() {
        let mut card = ScratchCard::with_surface(
            Config::default(),
            FakeSurface { per_erase: 50.0, ..Default::default() },
            StdRng::seed_from_u64(0),
        );
        card.handle_start(P);
        card.handle_move(P);
        card.reset();
        card.tick(Duration::from_secs(2));
        assert_eq!(card.surface().erases, 0);
        assert_eq!(card.surface().fills, 0);
        assert_eq!(card.coverage_percent(), 0.0);
    }

    #[test]
    fn reset_during_fade_cancels_pending_clear() {
        let mut card = fake_card(40.0);
        card.handle_start(P);
        card.handle_move(P);
        assert!(card.is_revealed());
        card.tick(Duration::from_millis(500));
        card.reset();
        card.tick(Duration::from_secs(5));
        assert_eq!(card.surface().clears, 0);
        assert_eq!(card.opacity(), 1.0);
        assert_eq!(card.phase(), Phase::Covered);
    }

    #[test]
    fn reset_repaints_without_resizing() {
        let mut card = fake_card(10.0);
        let fills = card.surface().fills;
        card.reset();
        assert_eq!(card.surface().fills, fills + 1);
        assert_eq!(card.surface().size(), (100, 100));
    }

    #[test]
    fn resize_while_revealed_keeps_reveal_and_clears() {
        let mut card = fake_card(40.0);
        card.handle_start(P);
        card.handle_move(P);
        card.tick(Duration::from_secs(2));
        let reading = card.coverage_percent();
        card.resize(50, 50);
        assert!(card.is_revealed());
        assert_eq!(card.coverage_percent(), reading);
        assert_eq!(card.surface().clears, 2);
    }

    #[test]
    fn resize_during_fade_clears_at_once() {
        let mut card = fake_card(40.0);
        card.handle_start(P);
        card.handle_move(P);
        card.tick(Duration::from_millis(100));
        assert!(card.is_fading());
        card.resize(80, 50);
        assert_eq!(card.surface().clears, 1);
        assert_eq!(card.surface().coverage(), Some(100.0));
        assert!(card.is_revealed());
        assert!(card.is_fading());
        // the fade still finishes and clears the (already clear) raster once more
        card.tick(Duration::from_secs(2));
        assert_eq!(card.surface().clears, 2);
        assert_eq!(card.opacity(), 0.0);
    }

    #[test]
    fn end_and_leave_stop_drawing() {
        let mut card = fake_card(1.0);
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        card.handle_input(&InputEvent::PointerDown(P), &bounds);
        assert!(card.state().drawing);
        card.handle_input(&InputEvent::PointerLeave, &bounds);
        assert!(!card.state().drawing);
        card.handle_input(&InputEvent::PointerMove(P), &bounds);
        assert_eq!(card.surface().erases, 1);
    }
}
