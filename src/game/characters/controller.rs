// Player character controller
//
// Each tick drives the animation state machine, integrates velocity and
// heading from the held keys, moves the target and advances the mixer.

use std::collections::HashMap;

use glam::Vec3;

use super::registry::AnimationRegistry;
use super::state::{character_state_machine, AnimationContext, CharacterStateMachine, StateName};
use super::stats::MovementStats;
use crate::core::math::{clamp_magnitude, sanitize_delta, Transform};
use crate::engine::animation::{AnimationClip, AnimationError, AnimationMixer};
use crate::engine::input::InputSnapshot;

/// Drives one humanoid: its animation states, its movement and its mixer
pub struct CharacterController {
    fsm: CharacterStateMachine,
    mixer: AnimationMixer,
    /// Filled in once every clip has loaded
    registry: Option<AnimationRegistry>,
    /// Local-space velocity (x lateral, y unused, z forward)
    velocity: Vec3,
    stats: MovementStats,
    /// The model being moved; ticking does nothing until it is attached
    target: Option<Transform>,
}

impl CharacterController {
    /// Create a controller with the standard movement stats
    pub fn new() -> Self {
        Self::with_stats(MovementStats::standard())
    }

    pub fn with_stats(stats: MovementStats) -> Self {
        Self {
            fsm: character_state_machine(),
            mixer: AnimationMixer::new(),
            registry: None,
            velocity: Vec3::ZERO,
            stats,
            target: None,
        }
    }

    /// Attach the loaded model the controller moves
    pub fn attach_target(&mut self, transform: Transform) {
        log::debug!("Character target attached at {:?}", transform.position);
        self.target = Some(transform);
    }

    #[allow(dead_code)]
    pub fn target(&self) -> Option<&Transform> {
        self.target.as_ref()
    }

    #[allow(dead_code)]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Name of the active animation state, if any
    pub fn state_name(&self) -> Option<StateName> {
        self.fsm.current_name()
    }

    #[allow(dead_code)]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[allow(dead_code)]
    pub fn registry(&self) -> Option<&AnimationRegistry> {
        self.registry.as_ref()
    }

    /// Bind the loaded clips and start in idle
    ///
    /// Only the complete clip set may be handed over, and only once.
    pub fn assets_ready(
        &mut self,
        clips: HashMap<String, AnimationClip>,
    ) -> Result<(), AnimationError> {
        if self.registry.is_some() {
            return Err(AnimationError::AlreadyLoaded);
        }

        let registry = AnimationRegistry::build(clips, &mut self.mixer)?;
        let registry = self.registry.insert(registry);
        log::info!("Character animations ready ({} states)", registry.len());

        let mut ctx = AnimationContext {
            registry,
            mixer: &mut self.mixer,
        };
        self.fsm.transition_to(StateName::Idle, &mut ctx)
    }

    /// Advance the character by `dt` seconds with the keys held in `input`
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> Result<(), AnimationError> {
        let Some(target) = self.target.as_mut() else {
            return Ok(());
        };
        let dt = sanitize_delta(dt);

        if let Some(registry) = self.registry.as_ref() {
            let mut ctx = AnimationContext {
                registry,
                mixer: &mut self.mixer,
            };
            self.fsm.update(dt, input, &mut ctx)?;
        }

        let velocity = self.velocity;
        let mut frame_deceleration = velocity * self.stats.deceleration * dt;
        frame_deceleration.z = clamp_magnitude(frame_deceleration.z, velocity.z);
        self.velocity += frame_deceleration;

        let mut acceleration = self.stats.acceleration;
        if input.modifier {
            acceleration *= self.stats.sprint_multiplier;
        }
        if self.fsm.current_name() == Some(StateName::Dance) {
            acceleration = Vec3::ZERO;
        }

        if input.forward {
            self.velocity.z += acceleration.z * dt;
        }
        if input.backward {
            self.velocity.z -= acceleration.z * dt;
        }

        // Turning uses the base rate; sprinting and dancing do not change it
        let turn = self.stats.turn_angle(dt);
        if input.left {
            target.rotate_yaw(turn);
        }
        if input.right {
            target.rotate_yaw(-turn);
        }

        let forward = target.forward();
        let sideways = target.sideways();
        target.position += sideways * (self.velocity.x * dt) + forward * (self.velocity.z * dt);
        log::trace!(
            "velocity {:?}, position {:?}",
            self.velocity,
            target.position
        );

        self.mixer.update(dt);
        Ok(())
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}
