// Per-character animation clock

use std::sync::Arc;

use super::action::AnimationAction;
use super::clip::AnimationClip;
use super::AnimationError;

/// Handle to an action owned by an [`AnimationMixer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(usize);

/// Events reported by the mixer during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    /// A non-looping action reached the end of its clip
    Finished(ActionHandle),
}

/// Advances every active action of one character and blends between them
#[derive(Debug)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    /// Whether each action has been started with `play`
    active: Vec<bool>,
    /// Accumulated mixer time in seconds, for reporting only
    time: f64,
    /// Global playback speed multiplier
    pub time_scale: f32,
    /// Events produced by the most recent update
    events: Vec<MixerEvent>,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            active: Vec::new(),
            time: 0.0,
            time_scale: 1.0,
            events: Vec::new(),
        }
    }

    /// Get the action playing `clip`, creating it on first request
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> ActionHandle {
        if let Some(index) = self
            .actions
            .iter()
            .position(|action| action.clip().name == clip.name)
        {
            return ActionHandle(index);
        }

        self.actions.push(AnimationAction::new(clip));
        self.active.push(false);
        ActionHandle(self.actions.len() - 1)
    }

    pub fn action(&self, handle: ActionHandle) -> Result<&AnimationAction, AnimationError> {
        self.actions
            .get(handle.0)
            .ok_or(AnimationError::InvalidHandle(handle.0))
    }

    pub fn action_mut(
        &mut self,
        handle: ActionHandle,
    ) -> Result<&mut AnimationAction, AnimationError> {
        self.actions
            .get_mut(handle.0)
            .ok_or(AnimationError::InvalidHandle(handle.0))
    }

    /// Start updating an action (no-op if it is already active)
    pub fn play(&mut self, handle: ActionHandle) -> Result<(), AnimationError> {
        self.action(handle)?;
        self.active[handle.0] = true;
        Ok(())
    }

    /// Stop updating an action and rewind it
    #[allow(dead_code)]
    pub fn stop(&mut self, handle: ActionHandle) -> Result<(), AnimationError> {
        self.action_mut(handle)?.reset();
        self.active[handle.0] = false;
        Ok(())
    }

    /// Whether the action is active and actually advancing
    #[allow(dead_code)]
    pub fn is_running(&self, handle: ActionHandle) -> bool {
        match self.action(handle) {
            Ok(action) => {
                self.active[handle.0]
                    && action.enabled
                    && !action.paused
                    && action.time_scale != 0.0
            }
            Err(_) => false,
        }
    }

    /// Whether `play` has been called on the action since it was last stopped
    #[allow(dead_code)]
    pub fn is_active(&self, handle: ActionHandle) -> bool {
        self.active.get(handle.0).copied().unwrap_or(false)
    }

    /// Fade the action's weight in from zero over `duration` seconds
    pub fn fade_in(&mut self, handle: ActionHandle, duration: f32) -> Result<(), AnimationError> {
        self.action_mut(handle)?.schedule_fading(duration, 0.0, 1.0);
        Ok(())
    }

    /// Fade the action's weight out to zero over `duration` seconds
    pub fn fade_out(&mut self, handle: ActionHandle, duration: f32) -> Result<(), AnimationError> {
        self.action_mut(handle)?.schedule_fading(duration, 1.0, 0.0);
        Ok(())
    }

    /// Ramp the action's time scale from `start` to `end` over `duration` seconds
    pub fn warp(
        &mut self,
        handle: ActionHandle,
        start: f32,
        end: f32,
        duration: f32,
    ) -> Result<(), AnimationError> {
        self.action_mut(handle)?.warp(start, end, duration);
        Ok(())
    }

    /// Blend from `outgoing` into `incoming` over `duration` seconds
    ///
    /// With `warp`, both actions' time scales are ramped so their cycle
    /// lengths meet during the blend instead of popping.
    pub fn cross_fade(
        &mut self,
        incoming: ActionHandle,
        outgoing: ActionHandle,
        duration: f32,
        warp: bool,
    ) -> Result<(), AnimationError> {
        if incoming == outgoing {
            return Err(AnimationError::SelfCrossFade);
        }

        let incoming_duration = self.action(incoming)?.clip().duration;
        let outgoing_duration = self.action(outgoing)?.clip().duration;

        self.fade_out(outgoing, duration)?;
        self.fade_in(incoming, duration)?;

        if warp && incoming_duration > 0.0 && outgoing_duration > 0.0 {
            let start_end_ratio = outgoing_duration / incoming_duration;
            let end_start_ratio = incoming_duration / outgoing_duration;

            self.warp(outgoing, 1.0, start_end_ratio, duration)?;
            self.warp(incoming, end_start_ratio, 1.0, duration)?;
        }

        Ok(())
    }

    /// Advance the clock and every active action by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.events.clear();

        let delta = dt * self.time_scale;
        self.time += f64::from(delta);

        for (index, action) in self.actions.iter_mut().enumerate() {
            if !self.active[index] {
                continue;
            }

            if action.update(delta) {
                log::debug!("Animation '{}' finished", action.clip().name);
                self.events.push(MixerEvent::Finished(ActionHandle(index)));
            }
        }
    }

    /// Whether the last update reported `handle` as finished
    #[allow(dead_code)]
    pub fn just_finished(&self, handle: ActionHandle) -> bool {
        self.events.contains(&MixerEvent::Finished(handle))
    }

    /// Events produced by the most recent update
    #[allow(dead_code)]
    pub fn finished_events(&self) -> &[MixerEvent] {
        &self.events
    }

    /// Current mixer time in seconds
    #[allow(dead_code)]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of actions owned by the mixer
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
