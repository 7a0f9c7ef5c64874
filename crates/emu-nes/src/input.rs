//! Input handling for the NES.
//!
//! Two layers:
//! 1. `NesButton`: logical button names mapped to controller bit positions.
//! 2. `InputQueue`: timed button events for scripted sequences.

use std::collections::VecDeque;

use crate::controller::{self, ButtonHandle};

/// Logical button on the NES controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NesButton {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl NesButton {
    /// Return the bit position for this button.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::A => controller::button::A,
            Self::B => controller::button::B,
            Self::Select => controller::button::SELECT,
            Self::Start => controller::button::START,
            Self::Up => controller::button::UP,
            Self::Down => controller::button::DOWN,
            Self::Left => controller::button::LEFT,
            Self::Right => controller::button::RIGHT,
        }
    }

    /// Parse a lowercase button name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let button = match name.to_ascii_lowercase().as_str() {
            "a" => Self::A,
            "b" => Self::B,
            "select" => Self::Select,
            "start" => Self::Start,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => return None,
        };
        Some(button)
    }
}

/// A timed button event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// Frame number at which this event fires.
    pub frame: u64,
    pub button: NesButton,
    /// True = press, false = release.
    pub pressed: bool,
}

/// Timed input queue for scripted button sequences.
///
/// Events are kept sorted by frame and applied at the start of each frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a raw input event. Events for the same frame keep their
    /// insertion order.
    pub fn push(&mut self, event: InputEvent) {
        let pos = self
            .events
            .iter()
            .position(|e| e.frame > event.frame)
            .unwrap_or(self.events.len());
        self.events.insert(pos, event);
    }

    /// Enqueue a button press and its release `hold_frames` later.
    pub fn enqueue_button(&mut self, button: NesButton, at_frame: u64, hold_frames: u64) {
        self.push(InputEvent {
            frame: at_frame,
            button,
            pressed: true,
        });
        self.push(InputEvent {
            frame: at_frame + hold_frames,
            button,
            pressed: false,
        });
    }

    /// Apply every event due at or before `frame`.
    pub fn process(&mut self, frame: u64, buttons: &ButtonHandle) {
        while self.events.front().is_some_and(|e| e.frame <= frame) {
            if let Some(event) = self.events.pop_front() {
                buttons.set(event.button.bit(), event.pressed);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enqueue_button_creates_press_and_release() {
        let mut queue = InputQueue::new();
        queue.enqueue_button(NesButton::A, 10, 3);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn process_applies_events() {
        let mut queue = InputQueue::new();
        let buttons = ButtonHandle::new();

        queue.enqueue_button(NesButton::A, 5, 3);

        queue.process(4, &buttons);
        assert_eq!(buttons.state() & 0x01, 0x00);

        queue.process(5, &buttons);
        assert_eq!(buttons.state() & 0x01, 0x01);

        queue.process(8, &buttons);
        assert_eq!(buttons.state() & 0x01, 0x00);
        assert!(queue.is_empty());
    }

    #[test]
    fn push_keeps_frame_order() {
        let mut queue = InputQueue::new();
        queue.enqueue_button(NesButton::Start, 20, 1);
        queue.enqueue_button(NesButton::Select, 2, 1);
        let buttons = ButtonHandle::new();
        queue.process(2, &buttons);
        assert_eq!(buttons.state(), 1 << NesButton::Select.bit());
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn names_parse() {
        assert_eq!(NesButton::from_name("Start"), Some(NesButton::Start));
        assert_eq!(NesButton::from_name("turbo"), None);
    }
}
