/// Raw input events as delivered by the host page.
/// Games translate these into [`Intent`](super::intent::Intent)s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed at view coordinates (x, y), each in -1..1 with y up.
    PointerDown { x: f32, y: f32, button: u8 },
    /// A button was released at view coordinates (x, y), each in -1..1 with y up.
    PointerUp { x: f32, y: f32, button: u8 },
    /// The cursor moved to view coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// Scroll wheel; positive `delta` scrolls away from the user.
    Wheel { delta: f32 },
    /// A custom event from the UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Primary (left) pointer button.
pub const BUTTON_PRIMARY: u8 = 0;
/// Secondary (right) pointer button.
pub const BUTTON_SECONDARY: u8 = 2;

/// Events captured since the last tick.
/// The host pushes, the runner drains once per frame before stepping.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: BUTTON_PRIMARY });
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::Wheel { delta: -1.0 });
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(events.len(), 3);
        assert!(q.is_empty());
        assert_eq!(events[2], InputEvent::Wheel { delta: -1.0 });
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 85 });
        q.push(InputEvent::KeyUp { key_code: 85 });
        let events = q.drain();
        assert!(matches!(events[0], InputEvent::KeyDown { key_code: 85 }));
        assert!(matches!(events[1], InputEvent::KeyUp { key_code: 85 }));
    }
}
