// Playable animation actions

use std::sync::Arc;

use super::clip::AnimationClip;
use crate::core::math::lerp;

/// How an action behaves when its time reaches the end of the clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play once, then pause (or disable) at the end
    Once,
    /// Wrap back to the start
    Repeat,
    /// Alternate forward and backward playback
    #[allow(dead_code)]
    PingPong,
}

/// A two-key linear ramp that tracks how far into itself it has run
///
/// Progress is counted from the moment the ramp starts, so it behaves the
/// same however long the owning mixer has been running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolant {
    pub duration: f32,
    /// Seconds of mixer time since the ramp started
    pub elapsed: f32,
    pub from: f32,
    pub to: f32,
}

impl Interpolant {
    /// Create a ramp from `from` to `to` lasting `duration` seconds
    pub fn new(duration: f32, from: f32, to: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            from,
            to,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Current value; the end keys are held outside the ramp
    pub fn value(&self) -> f32 {
        if self.elapsed <= 0.0 {
            self.from
        } else if self.elapsed >= self.duration {
            self.to
        } else {
            lerp(self.from, self.to, self.elapsed / self.duration)
        }
    }

    /// Whether the ramp has run past its end
    pub fn is_complete(&self) -> bool {
        self.elapsed > self.duration
    }
}

/// A time-addressable playback instance of a clip
///
/// `weight` and `time_scale` are the authored values; fades and warps
/// modulate them into the effective values the mixer uses each update.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    /// Local playback time in seconds
    pub time: f32,
    /// Playback speed multiplier (1.0 = normal)
    pub time_scale: f32,
    /// Blend weight before fading
    pub weight: f32,
    pub loop_mode: LoopMode,
    /// Hold the final pose when a `Once` action ends instead of disabling it
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,

    effective_weight: f32,
    effective_time_scale: f32,
    weight_fade: Option<Interpolant>,
    time_scale_warp: Option<Interpolant>,
    /// Travelling backward through a ping-pong cycle
    reversed: bool,
}

impl AnimationAction {
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            paused: false,
            enabled: true,
            effective_weight: 1.0,
            effective_time_scale: 1.0,
            weight_fade: None,
            time_scale_warp: None,
            reversed: false,
        }
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Weight contributed to the blend during the last update
    #[allow(dead_code)]
    pub fn effective_weight(&self) -> f32 {
        self.effective_weight
    }

    /// Time scale applied during the last update
    #[allow(dead_code)]
    pub fn effective_time_scale(&self) -> f32 {
        self.effective_time_scale
    }

    /// The pending weight fade, if any
    #[allow(dead_code)]
    pub fn weight_fade(&self) -> Option<&Interpolant> {
        self.weight_fade.as_ref()
    }

    /// The pending time-scale warp, if any
    #[allow(dead_code)]
    pub fn time_scale_warp(&self) -> Option<&Interpolant> {
        self.time_scale_warp.as_ref()
    }

    /// Rewind to the start and clear any fade or warp
    pub fn reset(&mut self) {
        self.paused = false;
        self.enabled = true;
        self.time = 0.0;
        self.reversed = false;
        self.stop_fading();
        self.stop_warping();
    }

    /// Set the time scale immediately, cancelling any warp
    pub fn set_effective_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
        self.effective_time_scale = if self.paused { 0.0 } else { time_scale };
        self.stop_warping();
    }

    /// Set the weight immediately, cancelling any fade
    pub fn set_effective_weight(&mut self, weight: f32) {
        self.weight = weight;
        self.effective_weight = if self.enabled { weight } else { 0.0 };
        self.stop_fading();
    }

    pub fn stop_fading(&mut self) {
        self.weight_fade = None;
    }

    pub fn stop_warping(&mut self) {
        self.time_scale_warp = None;
    }

    /// Whether a `Once` action has played through to the end of its clip
    pub fn has_finished(&self) -> bool {
        self.loop_mode == LoopMode::Once && self.time >= self.clip.duration
    }

    /// Ramp the weight multiplier from `from` to `to`, starting now
    pub(crate) fn schedule_fading(&mut self, duration: f32, from: f32, to: f32) {
        self.weight_fade = Some(Interpolant::new(duration, from, to));
    }

    /// Ramp the time scale from `start` to `end`, starting now
    pub(crate) fn warp(&mut self, start: f32, end: f32, duration: f32) {
        let base = if self.time_scale != 0.0 {
            self.time_scale
        } else {
            1.0
        };
        self.time_scale_warp = Some(Interpolant::new(duration, start / base, end / base));
    }

    /// Advance by `dt` seconds of mixer time
    ///
    /// Returns true when a `Once` action reached its end during this update.
    pub(crate) fn update(&mut self, dt: f32) -> bool {
        if !self.enabled {
            self.update_weight(dt);
            return false;
        }

        let time_scale = self.update_time_scale(dt);
        let finished = self.advance(dt * time_scale);
        self.update_weight(dt);
        finished
    }

    fn update_time_scale(&mut self, dt: f32) -> f32 {
        let mut time_scale = 0.0;

        if !self.paused {
            time_scale = self.time_scale;

            if let Some(warp) = self.time_scale_warp.as_mut() {
                warp.advance(dt);
                time_scale *= warp.value();

                if warp.is_complete() {
                    self.stop_warping();
                    if time_scale == 0.0 {
                        self.paused = true;
                    } else {
                        self.time_scale = time_scale;
                    }
                }
            }
        }

        self.effective_time_scale = time_scale;
        time_scale
    }

    fn update_weight(&mut self, dt: f32) -> f32 {
        let mut weight = 0.0;

        if self.enabled {
            weight = self.weight;

            if let Some(fade) = self.weight_fade.as_mut() {
                fade.advance(dt);
                let factor = fade.value();
                weight *= factor;

                if fade.is_complete() {
                    self.stop_fading();
                    if factor == 0.0 {
                        self.enabled = false;
                    }
                }
            }
        }

        self.effective_weight = weight;
        weight
    }

    fn advance(&mut self, delta: f32) -> bool {
        let duration = self.clip.duration;
        if delta == 0.0 || duration <= 0.0 {
            return false;
        }

        match self.loop_mode {
            LoopMode::Once => {
                let time = self.time + delta;
                if (0.0..duration).contains(&time) {
                    self.time = time;
                    return false;
                }

                self.time = time.clamp(0.0, duration);
                if self.clamp_when_finished {
                    self.paused = true;
                } else {
                    self.enabled = false;
                }
                true
            }
            LoopMode::Repeat => {
                self.time = (self.time + delta).rem_euclid(duration);
                false
            }
            LoopMode::PingPong => {
                let cycle = duration * 2.0;
                let phase = if self.reversed {
                    cycle - self.time
                } else {
                    self.time
                };
                let phase = (phase + delta).rem_euclid(cycle);

                if phase > duration {
                    self.time = cycle - phase;
                    self.reversed = true;
                } else {
                    self.time = phase;
                    self.reversed = false;
                }
                false
            }
        }
    }
}
