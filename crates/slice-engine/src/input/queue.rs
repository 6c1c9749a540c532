/// Raw host input. `Controls` turns these into player commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at display coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// DOM `keyCode` of a pressed key.
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// A host-defined event (touch buttons, menu actions).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events pushed by the host between frames.
///
/// The world reads the queue during the first fixed step of a frame; the
/// runner clears it once a step has consumed it. Events pushed during a
/// frame with no step wait for the next one.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    const INITIAL_CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drop pending events, keeping the allocation.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Pending events in arrival order.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_keep_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 39 });
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        let seen: Vec<_> = q.iter().copied().collect();
        assert_eq!(
            seen,
            vec![
                InputEvent::KeyDown { key_code: 39 },
                InputEvent::PointerDown { x: 10.0, y: 20.0 },
            ]
        );
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyUp { key_code: 37 });
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        q.clear();
        assert!(q.is_empty());
    }
}
