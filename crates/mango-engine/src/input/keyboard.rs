use std::collections::HashSet;

/// Keys the engine names. Anything else is carried as its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Left,
    Up,
    Right,
    Down,
    Other(u32),
}

impl Key {
    /// Map a DOM `keyCode` to a key.
    pub fn from_code(code: u32) -> Self {
        match code {
            13 => Key::Enter,
            27 => Key::Escape,
            32 => Key::Space,
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            40 => Key::Down,
            other => Key::Other(other),
        }
    }
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The window lost focus; every held key is considered released.
    FocusLost,
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner folds them into
/// [`InputState`] once per frame.
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

/// Keys currently held down. Behaviors sample it once per fixed step.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => self.press(Key::from_code(key_code)),
            InputEvent::KeyUp { key_code } => self.release(Key::from_code(key_code)),
            InputEvent::FocusLost => self.release_all(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::KeyUp { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn key_codes_map_to_keys() {
        assert_eq!(Key::from_code(32), Key::Space);
        assert_eq!(Key::from_code(38), Key::Up);
        assert_eq!(Key::from_code(65), Key::Other(65));
    }

    #[test]
    fn state_tracks_held_keys() {
        let mut state = InputState::new();
        state.apply(&InputEvent::KeyDown { key_code: 32 });
        assert!(state.is_key_pressed(Key::Space));
        // Auto-repeat keydowns keep the key held.
        state.apply(&InputEvent::KeyDown { key_code: 32 });
        assert!(state.is_key_pressed(Key::Space));
        state.apply(&InputEvent::KeyUp { key_code: 32 });
        assert!(!state.is_key_pressed(Key::Space));
    }

    #[test]
    fn focus_lost_releases_everything() {
        let mut state = InputState::new();
        state.press(Key::Space);
        state.press(Key::Left);
        state.apply(&InputEvent::FocusLost);
        assert!(!state.is_key_pressed(Key::Space));
        assert!(!state.is_key_pressed(Key::Left));
    }
}
