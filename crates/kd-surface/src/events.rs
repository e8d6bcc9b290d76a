//! Pointer events as forwarded by a platform adapter.

use crate::surface::DrawingSurface;
use kd_core::Point;

/// One pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}

impl DrawingSurface {
    /// Dispatch a forwarded platform event to the pointer protocol.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.on_pointer_down(Point::new(x, y)),
            PointerEvent::Move { x, y } => self.on_pointer_move(Point::new(x, y)),
            PointerEvent::Up => self.on_pointer_up(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_drive_the_stroke_lifecycle() {
        let mut surface = DrawingSurface::new(100, 100);
        for event in [
            PointerEvent::Down { x: 10.0, y: 10.0 },
            PointerEvent::Move { x: 20.0, y: 10.0 },
            PointerEvent::Move { x: 20.0, y: 20.0 },
            PointerEvent::Up,
        ] {
            surface.handle_event(event);
        }

        let committed = surface.state().committed();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].points().len(), 3);
    }
}
