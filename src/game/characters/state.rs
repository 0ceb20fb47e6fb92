// Character animation state machine

use std::fmt;

use super::registry::AnimationRegistry;
use crate::engine::animation::{AnimationError, AnimationMixer, LoopMode};
use crate::engine::fsm::{State, StateMachine};
use crate::engine::input::InputSnapshot;

/// Blend time for transitions into or out of idle
pub const IDLE_BLEND_SECS: f32 = 0.5;
/// Blend time between walking and running, and into dancing
pub const QUICK_BLEND_SECS: f32 = 0.2;

/// Every state the character can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    Idle,
    Walking,
    Run,
    Dance,
    /// Reserved; never registered
    #[allow(dead_code)]
    Jump,
}

impl StateName {
    /// States that have an animation and a registered state
    pub const ANIMATED: [StateName; 4] = [
        StateName::Idle,
        StateName::Walking,
        StateName::Run,
        StateName::Dance,
    ];

    /// Name of the clip asset that animates this state
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walk",
            Self::Run => "run",
            Self::Dance => "dance",
            Self::Jump => "jump",
        }
    }

    /// Walking and running share a gait, so blends between them keep phase
    pub fn is_locomotion(&self) -> bool {
        matches!(self, Self::Walking | Self::Run)
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Run => "run",
            Self::Dance => "dance",
            Self::Jump => "jump",
        };
        f.write_str(name)
    }
}

/// Cross-fade length for a transition
pub fn blend_duration(from: StateName, to: StateName) -> f32 {
    if to == StateName::Dance || (from.is_locomotion() && to.is_locomotion()) {
        QUICK_BLEND_SECS
    } else {
        IDLE_BLEND_SECS
    }
}

/// Decide the next state from the current one and this tick's input
///
/// `clip_finished` reports that the current state's one-shot clip has
/// played to the end.
pub fn next_state(
    current: StateName,
    input: &InputSnapshot,
    clip_finished: bool,
) -> Option<StateName> {
    match current {
        StateName::Idle => {
            if input.is_moving() {
                Some(StateName::Walking)
            } else if input.action {
                Some(StateName::Dance)
            } else {
                None
            }
        }
        StateName::Walking => match (input.is_moving(), input.modifier) {
            (true, true) => Some(StateName::Run),
            (true, false) => None,
            (false, _) => Some(StateName::Idle),
        },
        StateName::Run => match (input.is_moving(), input.modifier) {
            (true, false) => Some(StateName::Walking),
            (true, true) => None,
            (false, _) => Some(StateName::Idle),
        },
        // Dance ignores input and only ends when its clip does
        StateName::Dance => clip_finished.then_some(StateName::Idle),
        StateName::Jump => None,
    }
}

/// What the state hooks act on
pub struct AnimationContext<'a> {
    pub registry: &'a AnimationRegistry,
    pub mixer: &'a mut AnimationMixer,
}

/// One activation of a character state
///
/// A fresh value is built on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Idle,
    Walking,
    Run,
    Dance,
}

impl CharacterState {
    /// Blend the incoming action in from the previous state's action
    fn blend_from(
        &self,
        previous: &CharacterState,
        ctx: &mut AnimationContext<'_>,
    ) -> Result<(), AnimationError> {
        let from = previous.name();
        let to = self.name();
        let incoming = ctx.registry.get(to)?.action;
        let outgoing = ctx.registry.get(from)?.action;

        if from.is_locomotion() && to.is_locomotion() {
            // Land on the same point of the stride in the new clip
            let (out_time, out_duration) = {
                let action = ctx.mixer.action(outgoing)?;
                (action.time, action.clip().duration)
            };
            let action = ctx.mixer.action_mut(incoming)?;
            action.enabled = true;
            if out_duration > 0.0 {
                action.time = out_time * (action.clip().duration / out_duration);
            }
        } else {
            let action = ctx.mixer.action_mut(incoming)?;
            action.enabled = true;
            action.time = 0.0;
            action.set_effective_time_scale(1.0);
            action.set_effective_weight(1.0);
        }

        let duration = blend_duration(from, to);
        log::debug!("Blending {} -> {} over {:.1}s", from, to, duration);
        ctx.mixer.cross_fade(incoming, outgoing, duration, true)
    }
}

impl State for CharacterState {
    type Name = StateName;
    type Input = InputSnapshot;
    type Context<'a> = AnimationContext<'a>;
    type Error = AnimationError;

    fn name(&self) -> StateName {
        match self {
            Self::Idle => StateName::Idle,
            Self::Walking => StateName::Walking,
            Self::Run => StateName::Run,
            Self::Dance => StateName::Dance,
        }
    }

    fn enter(
        &mut self,
        previous: Option<&Self>,
        ctx: &mut AnimationContext<'_>,
    ) -> Result<Option<StateName>, AnimationError> {
        let incoming = ctx.registry.get(self.name())?.action;

        if *self == Self::Dance {
            // One-shot: hold the last pose until the state machine moves on
            let action = ctx.mixer.action_mut(incoming)?;
            action.reset();
            action.loop_mode = LoopMode::Once;
            action.clamp_when_finished = true;
        }

        if let Some(previous) = previous {
            self.blend_from(previous, ctx)?;
        }

        ctx.mixer.play(incoming)?;
        Ok(None)
    }

    fn update(
        &mut self,
        _dt: f32,
        input: &InputSnapshot,
        ctx: &mut AnimationContext<'_>,
    ) -> Result<Option<StateName>, AnimationError> {
        let clip_finished = match self {
            Self::Dance => {
                let action = ctx.registry.get(StateName::Dance)?.action;
                ctx.mixer.action(action)?.has_finished()
            }
            _ => false,
        };

        Ok(next_state(self.name(), input, clip_finished))
    }

    fn exit(&mut self, ctx: &mut AnimationContext<'_>) {
        if *self == Self::Dance {
            let finished = ctx
                .registry
                .get(StateName::Dance)
                .and_then(|entry| ctx.mixer.action(entry.action))
                .map(|action| action.has_finished())
                .unwrap_or(false);
            if !finished {
                log::debug!("Dance interrupted before the clip finished");
            }
        }
    }
}

/// State machine driving the character's animations
pub type CharacterStateMachine = StateMachine<CharacterState>;

/// Build a state machine with every animated state registered
pub fn character_state_machine() -> CharacterStateMachine {
    let mut fsm = CharacterStateMachine::new();
    fsm.register_state(StateName::Idle, || CharacterState::Idle);
    fsm.register_state(StateName::Walking, || CharacterState::Walking);
    fsm.register_state(StateName::Run, || CharacterState::Run);
    fsm.register_state(StateName::Dance, || CharacterState::Dance);
    fsm
}
