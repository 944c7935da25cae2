// Reveal state machine.
//
// `CoverState` is a plain value; `transition` is pure. The card feeds it inputs,
// carries out whatever `Command` comes back against the surface, and reports the
// measured coverage back in as `Input::Measured`.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverState {
    pub revealed: bool,
    /// 0..100; never decreases within a session.
    pub coverage_percent: f32,
    /// True while the pointer/touch is held.
    pub drawing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Covered,
    Revealing,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Start(Point),
    Move(Point),
    End,
    /// Coverage read back from the surface after an erase.
    Measured(f32),
    Reset,
}

/// Side effect the owner must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Scratch at this surface-local point, then report `Measured`.
    Erase(Point),
    /// Entered `Revealed`: start the fade, then clear the surface.
    BeginReveal,
    /// Back to covered: restore opacity and repaint the cover.
    Repaint,
}

impl CoverState {
    pub fn phase(&self) -> Phase {
        if self.revealed {
            Phase::Revealed
        } else if self.drawing {
            Phase::Revealing
        } else {
            Phase::Covered
        }
    }

    pub fn transition(self, input: Input, threshold_percent: f32) -> (CoverState, Option<Command>) {
        match input {
            Input::Start(p) => {
                let next = CoverState { drawing: true, ..self };
                if self.revealed { (next, None) } else { (next, Some(Command::Erase(p))) }
            }
            Input::Move(p) => {
                if !self.drawing || self.revealed {
                    (self, None)
                } else {
                    (self, Some(Command::Erase(p)))
                }
            }
            Input::End => (CoverState { drawing: false, ..self }, None),
            Input::Measured(percent) => {
                if self.revealed {
                    return (self, None);
                }
                let coverage_percent = percent.clamp(0.0, 100.0).max(self.coverage_percent);
                if coverage_percent > threshold_percent {
                    (CoverState { revealed: true, coverage_percent, ..self }, Some(Command::BeginReveal))
                } else {
                    (CoverState { coverage_percent, ..self }, None)
                }
            }
            Input::Reset => (CoverState::default(), Some(Command::Repaint)),
        }
    }
}
