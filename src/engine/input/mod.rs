// Input handling system
//
// Turns physical key presses into the level-triggered `InputSnapshot` the
// character controller reads every tick. Only the current state of each
// key matters; nothing is buffered between frames.
//
// ## Architecture
//
// - `action`: Defines character actions and default key bindings
// - `config`: Input configuration and remapping system
// - `snapshot`: The boolean key-state view handed to the controller
// - `manager`: Applies keyboard events to the snapshot
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input_manager = InputManager::new();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Once per frame, hand the snapshot to the controller
// controller.tick(dt, input_manager.snapshot())?;
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod snapshot;

// Re-export commonly used types
#[allow(unused_imports)]
pub use action::Action;
pub use manager::InputManager;
pub use snapshot::InputSnapshot;
