// Input manager - applies keyboard events to the character's input snapshot

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::snapshot::InputSnapshot;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Owns the key bindings and the single snapshot the controller reads
#[derive(Debug)]
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Sources currently held down
    held_sources: HashSet<InputSource>,

    /// Current level of every action
    snapshot: InputSnapshot,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create an input manager with custom bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            held_sources: HashSet::new(),
            snapshot: InputSnapshot::default(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key codes
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats carry no new level information
            if event.repeat {
                return;
            }
            self.process_key(key_code, event.state);
        }
    }

    /// Apply a press or release of a key
    pub fn process_key(&mut self, key_code: KeyCode, state: ElementState) {
        let source = InputSource::key(key_code);
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                self.held_sources.insert(source);
            }
            ElementState::Released => {
                self.held_sources.remove(&source);
            }
        }

        self.refresh(action);
    }

    /// Recompute one action's level from every source bound to it
    fn refresh(&mut self, action: Action) {
        let held = self
            .config
            .get_sources(action)
            .iter()
            .any(|source| self.held_sources.contains(source));

        if held != self.snapshot.is_held(action) {
            log::trace!("{:?} {}", action, if held { "held" } else { "released" });
        }
        self.snapshot.set(action, held);
    }

    /// The current input levels
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Release every action (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held_sources.clear();
        self.snapshot = InputSnapshot::default();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
