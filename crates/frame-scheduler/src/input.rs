//! Window and pointer input, queued until the next tick
//!
//! Event sources never touch effect state directly; they push
//! [`InputEvent`]s and the scheduler drains them in arrival order at the
//! start of each tick.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to client pixel coordinates
    PointerMove { x: f32, y: f32 },
    /// Primary button click at client pixel coordinates
    Click { x: f32, y: f32 },
    /// Surface resized
    Resize { width: u32, height: u32 },
    /// User grabbed the camera; suspends auto-rotation
    CameraDragStart,
    /// Orbit delta in radians
    CameraDrag { dx: f32, dy: f32 },
    /// Dolly delta in world units
    Zoom { delta: f32 },
}

#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.events.extend(events);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Something that produces input between ticks (a window, a replay, a test)
pub trait EventSource {
    fn poll(&mut self, now_ms: f64, queue: &mut InputQueue);
}

/// A source that never produces anything
pub struct NoInput;

impl EventSource for NoInput {
    fn poll(&mut self, _now_ms: f64, _queue: &mut InputQueue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        queue.push(InputEvent::CameraDragStart);
        queue.extend([InputEvent::Click { x: 2.0, y: 2.0 }]);
        assert_eq!(queue.len(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::PointerMove { x: 1.0, y: 1.0 },
                InputEvent::CameraDragStart,
                InputEvent::Click { x: 2.0, y: 2.0 },
            ]
        );
        assert!(queue.is_empty());
    }
}
