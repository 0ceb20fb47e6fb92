// Skeletal animation playback
//
// Clips hold the timing of one authored animation, actions are playable
// instances of a clip, and the mixer is the per-character clock that
// advances every active action and blends between them.

pub mod action;
pub mod clip;
pub mod mixer;

pub use action::LoopMode;
pub use clip::AnimationClip;
pub use mixer::{ActionHandle, AnimationMixer};

use crate::engine::fsm::StateMachineError;

/// Animation playback errors
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("No animation registered for state: {0}")]
    MissingEntry(String),

    #[error("Invalid action handle: {0}")]
    InvalidHandle(usize),

    #[error("An action cannot cross-fade from itself")]
    SelfCrossFade,

    #[error("Character animations are already loaded")]
    AlreadyLoaded,

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}
