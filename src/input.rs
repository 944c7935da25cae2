// Input events and client → surface-local coordinate mapping.
//
// Touch events carry the whole touch list; only the first touch is used and
// the rest are ignored. A touch event with no touches maps to nothing.

use crate::types::{Bounds, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
}

impl InputEvent {
    /// Client coordinates this event refers to, if any.
    pub fn client_point(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown(p) | InputEvent::PointerMove(p) => Some(*p),
            InputEvent::TouchStart(touches) | InputEvent::TouchMove(touches) => touches.first().copied(),
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => None,
        }
    }

    /// Surface-local coordinates for this event.
    pub fn local_point(&self, bounds: &Bounds) -> Option<Point> {
        self.client_point().map(|p| to_local(p, bounds))
    }
}

/// Subtract the bounding box's top-left from client coordinates.
#[inline]
pub fn to_local(client: Point, bounds: &Bounds) -> Point {
    Point::new(client.x - bounds.left, client.y - bounds.top)
}

/// Turns a polled mouse (position + left button) into discrete pointer events,
/// the way an element receives them: down/move only inside the bounds, a leave
/// when the pointer exits, an up on release.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    inside: bool,
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, pos: Option<Point>, button_down: bool, bounds: &Bounds) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let inside_now = pos.is_some_and(|p| bounds.contains(p));

        if self.inside && !inside_now {
            events.push(InputEvent::PointerLeave);
        }

        if let Some(p) = pos.filter(|_| inside_now) {
            if button_down && !self.down {
                events.push(InputEvent::PointerDown(p));
            } else if self.last != Some(p) {
                events.push(InputEvent::PointerMove(p));
            }
        }

        if !button_down && self.down {
            events.push(InputEvent::PointerUp);
        }

        self.inside = inside_now;
        self.down = button_down;
        self.last = pos;
        events
    }
}

/// A clickable box: a click is a press and a release that both land inside it.
/// Visual: the reset button under the card; `hovered` lets the drawer highlight it.
#[derive(Debug, Clone, Default)]
pub struct Button {
    pub bounds: Bounds,
    pressed: bool,
    down: bool,
    hovered: bool,
}

impl Button {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, ..Self::default() }
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Feed one polled mouse sample; returns true on the frame the click completes.
    pub fn poll(&mut self, pos: Option<Point>, button_down: bool) -> bool {
        self.hovered = pos.is_some_and(|p| self.bounds.contains(p));
        let mut clicked = false;
        if button_down && !self.down {
            self.pressed = self.hovered;
        } else if !button_down && self.down {
            clicked = self.pressed && self.hovered;
            self.pressed = false;
        }
        self.down = button_down;
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(40.0, 30.0, 320.0, 180.0);

    #[test]
    fn pointer_maps_by_offset() {
        let e = InputEvent::PointerMove(Point::new(50.0, 45.0));
        assert_eq!(e.local_point(&BOUNDS), Some(Point::new(10.0, 15.0)));
    }

    #[test]
    fn touch_uses_first_point_only() {
        let e = InputEvent::TouchMove(vec![Point::new(41.0, 31.0), Point::new(200.0, 100.0)]);
        assert_eq!(e.local_point(&BOUNDS), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn empty_touch_list_maps_to_nothing() {
        assert_eq!(InputEvent::TouchStart(Vec::new()).local_point(&BOUNDS), None);
        assert_eq!(InputEvent::TouchEnd.local_point(&BOUNDS), None);
    }

    #[test]
    fn tracker_emits_down_move_up() {
        let mut t = PointerTracker::new();
        let a = Point::new(100.0, 100.0);
        let b = Point::new(110.0, 100.0);
        assert_eq!(t.poll(Some(a), false, &BOUNDS), vec![InputEvent::PointerMove(a)]);
        assert_eq!(t.poll(Some(a), true, &BOUNDS), vec![InputEvent::PointerDown(a)]);
        assert_eq!(t.poll(Some(a), true, &BOUNDS), vec![]);
        assert_eq!(t.poll(Some(b), true, &BOUNDS), vec![InputEvent::PointerMove(b)]);
        assert_eq!(t.poll(Some(b), false, &BOUNDS), vec![InputEvent::PointerUp]);
    }

    #[test]
    fn tracker_emits_leave_when_exiting_bounds() {
        let mut t = PointerTracker::new();
        t.poll(Some(Point::new(100.0, 100.0)), true, &BOUNDS);
        let events = t.poll(Some(Point::new(5.0, 5.0)), true, &BOUNDS);
        assert_eq!(events, vec![InputEvent::PointerLeave]);
        // pressing outside never starts a stroke
        let events = t.poll(None, true, &BOUNDS);
        assert!(events.is_empty());
    }

    #[test]
    fn button_clicks_on_release_inside() {
        let mut b = Button::new(Bounds::new(0.0, 0.0, 50.0, 20.0));
        let inside = Some(Point::new(10.0, 10.0));
        assert!(!b.poll(inside, false));
        assert!(b.hovered());
        assert!(!b.poll(inside, true));
        assert!(b.poll(inside, false));
        // a second release without a press does nothing
        assert!(!b.poll(inside, false));
    }

    #[test]
    fn button_ignores_drag_in_or_out() {
        let mut b = Button::new(Bounds::new(0.0, 0.0, 50.0, 20.0));
        let inside = Some(Point::new(10.0, 10.0));
        let outside = Some(Point::new(80.0, 10.0));
        // pressed outside, released inside
        b.poll(outside, true);
        assert!(!b.poll(inside, false));
        // pressed inside, released outside
        b.poll(inside, true);
        assert!(!b.poll(outside, false));
    }
}
