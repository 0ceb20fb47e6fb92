// Character system
//
// This module contains everything related to the player character:
// - Movement stats
// - Animation registry binding clips to states
// - State machine choosing and blending animations
// - Controller integrating movement each tick

pub mod controller;
pub mod registry;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use controller::CharacterController;
pub use state::StateName;
