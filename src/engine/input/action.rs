// Character action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents every input the character controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    Forward,
    Backward,
    Left,
    Right,

    /// Triggers the dance emote
    Action,
    /// Sprint
    Modifier,
}

impl Action {
    #[allow(dead_code)]
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Action,
        Action::Modifier,
    ];
}

/// Represents a physical input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD - standard gaming layout)
        (InputSource::key(KeyCode::KeyW), Action::Forward),
        (InputSource::key(KeyCode::KeyS), Action::Backward),
        (InputSource::key(KeyCode::KeyA), Action::Left),
        (InputSource::key(KeyCode::KeyD), Action::Right),
        // Arrow keys mirror WASD
        (InputSource::key(KeyCode::ArrowUp), Action::Forward),
        (InputSource::key(KeyCode::ArrowDown), Action::Backward),
        (InputSource::key(KeyCode::ArrowLeft), Action::Left),
        (InputSource::key(KeyCode::ArrowRight), Action::Right),
        // Dance and sprint
        (InputSource::key(KeyCode::Space), Action::Action),
        (InputSource::key(KeyCode::ShiftLeft), Action::Modifier),
        (InputSource::key(KeyCode::ShiftRight), Action::Modifier),
    ]
}
