//! Keyboard state shared between the frame driver and input-consuming systems.

use std::cell::RefCell;
use std::collections::HashSet;

use winit::event::{ElementState, VirtualKeyCode};

/// Set of keys which are currently held.
///
/// Updated by the frame driver on press/release events and queried by systems.
///
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys: RefCell<HashSet<VirtualKeyCode>>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates state of the key with press or release event.
    pub fn handle(&self, key: VirtualKeyCode, state: ElementState) {
        let mut keys = self.keys.borrow_mut();
        match state {
            ElementState::Pressed => keys.insert(key),
            ElementState::Released => keys.remove(&key),
        };
    }

    /// Returns `true` if the key is currently held.
    pub fn is_key_down(&self, key: VirtualKeyCode) -> bool {
        self.keys.borrow().contains(&key)
    }

    /// Returns every currently held key.
    pub fn held(&self) -> Vec<VirtualKeyCode> {
        self.keys.borrow().iter().copied().collect()
    }
}

/// Key event replayed at the start of some frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub frame: u64,
    pub key: VirtualKeyCode,
    pub state: ElementState,
}

/// Timeline of key events which stands in for a window.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    /// Events sorted by frame.
    events: Vec<KeyEvent>,
}

impl InputScript {
    /// Creates script from events in any order.
    pub fn new(mut events: Vec<KeyEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self { events }
    }

    /// Holds `key` from frame `from` until frame `to`, exclusive.
    pub fn hold(mut self, key: VirtualKeyCode, from: u64, to: u64) -> Self {
        self.events.push(KeyEvent {
            frame: from,
            key,
            state: ElementState::Pressed,
        });
        self.events.push(KeyEvent {
            frame: to,
            key,
            state: ElementState::Released,
        });
        Self::new(self.events)
    }

    /// Events which happen at the start of the frame.
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &KeyEvent> {
        self.events.iter().filter(move |event| event.frame == frame)
    }

    /// Feeds events of the frame into keyboard state.
    pub fn replay(&self, frame: u64, keyboard: &KeyboardState) {
        for event in self.events_at(frame) {
            log::debug!("frame {}: {:?} {:?}", frame, event.key, event.state);
            keyboard.handle(event.key, event.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let keyboard = KeyboardState::new();
        assert!(!keyboard.is_key_down(VirtualKeyCode::A));

        keyboard.handle(VirtualKeyCode::A, ElementState::Pressed);
        keyboard.handle(VirtualKeyCode::A, ElementState::Pressed);
        assert!(keyboard.is_key_down(VirtualKeyCode::A));
        assert_eq!(keyboard.held(), vec![VirtualKeyCode::A]);

        keyboard.handle(VirtualKeyCode::A, ElementState::Released);
        assert!(!keyboard.is_key_down(VirtualKeyCode::A));
        keyboard.handle(VirtualKeyCode::D, ElementState::Released);
        assert!(keyboard.held().is_empty());
    }

    #[test]
    fn test_script_replay() {
        let script = InputScript::default()
            .hold(VirtualKeyCode::D, 2, 4)
            .hold(VirtualKeyCode::A, 3, 5);
        let keyboard = KeyboardState::new();

        let mut timeline = Vec::new();
        for frame in 0..6 {
            script.replay(frame, &keyboard);
            timeline.push((
                keyboard.is_key_down(VirtualKeyCode::A),
                keyboard.is_key_down(VirtualKeyCode::D),
            ));
        }
        assert_eq!(
            timeline,
            vec![
                (false, false),
                (false, false),
                (false, true),
                (true, true),
                (true, false),
                (false, false),
            ],
        );
    }
}
