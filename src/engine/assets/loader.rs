// Character asset loading

use super::AssetError;
use crate::core::math::Transform;
use crate::engine::animation::AnimationClip;
use std::collections::HashMap;
use std::task::Poll;

/// Frame rate the standard clips were authored at
const STANDARD_FPS: f32 = 30.0;

/// Frame counts of the standard humanoid clips
const STANDARD_CLIPS: [(&str, usize); 4] = [("idle", 120), ("walk", 33), ("run", 22), ("dance", 180)];

/// Anything that can resolve the character model and its animation clips
///
/// Each poll either resolves the request or reports it is still in flight.
pub trait CharacterAssetSource {
    /// Resolve the humanoid model, yielding its initial transform
    fn poll_model(&mut self) -> Poll<Result<Transform, AssetError>>;

    /// Resolve the clip for a logical animation name
    fn poll_clip(&mut self, name: &str) -> Poll<Result<AnimationClip, AssetError>>;
}

/// Built-in humanoid and locomotion clips, available immediately
#[derive(Debug, Default)]
pub struct StandardAssets;

impl StandardAssets {
    /// Names of every clip this source provides
    pub fn clip_names() -> impl Iterator<Item = &'static str> {
        STANDARD_CLIPS.iter().map(|(name, _)| *name)
    }
}

impl CharacterAssetSource for StandardAssets {
    fn poll_model(&mut self) -> Poll<Result<Transform, AssetError>> {
        Poll::Ready(Ok(Transform::IDENTITY))
    }

    fn poll_clip(&mut self, name: &str) -> Poll<Result<AnimationClip, AssetError>> {
        let clip = STANDARD_CLIPS
            .iter()
            .find(|(clip_name, _)| *clip_name == name)
            .map(|(clip_name, frames)| AnimationClip::from_frames(clip_name, *frames, STANDARD_FPS))
            .ok_or_else(|| AssetError::NotFound(name.to_string()));
        Poll::Ready(clip)
    }
}

/// Progress reported by [`CharacterLoader::poll`]
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// The model is available; its transform becomes the controller's target
    ModelReady(Transform),
    /// Every requested clip resolved, keyed by clip name
    AnimationsReady(HashMap<String, AnimationClip>),
}

/// Tracks the model and a fixed set of clips until all of them resolve
///
/// Clips are handed over together, never one at a time, so a partial load
/// cannot start the character's state machine.
pub struct CharacterLoader<S: CharacterAssetSource> {
    source: S,
    model_loaded: bool,
    pending: Vec<String>,
    loaded: HashMap<String, AnimationClip>,
    total: usize,
    complete: bool,
}

impl<S: CharacterAssetSource> CharacterLoader<S> {
    /// Request the model and every named clip from `source`
    pub fn new<'a>(
        source: S,
        clip_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AssetError> {
        let mut pending: Vec<String> = Vec::new();
        for name in clip_names {
            if pending.iter().any(|requested| requested == name) {
                return Err(AssetError::AlreadyRequested(name.to_string()));
            }
            pending.push(name.to_string());
        }

        let total = pending.len();
        log::info!("Loading character model and {} animations", total);

        Ok(Self {
            source,
            model_loaded: false,
            pending,
            loaded: HashMap::new(),
            total,
            complete: false,
        })
    }

    /// Poll every outstanding request once
    ///
    /// A failed request is returned as an error; the loader does not retry it.
    pub fn poll(&mut self) -> Result<Vec<LoadEvent>, AssetError> {
        let mut events = Vec::new();

        if !self.model_loaded {
            if let Poll::Ready(model) = self.source.poll_model() {
                let transform = model?;
                self.model_loaded = true;
                log::info!("Character model loaded");
                events.push(LoadEvent::ModelReady(transform));
            }
        }

        let source = &mut self.source;
        let loaded = &mut self.loaded;
        let mut failure = None;
        self.pending.retain(|name| {
            if failure.is_some() {
                return true;
            }
            match source.poll_clip(name) {
                Poll::Ready(Ok(clip)) => {
                    log::debug!("Animation '{}' loaded ({:.2}s)", name, clip.duration);
                    loaded.insert(name.clone(), clip);
                    false
                }
                Poll::Ready(Err(err)) => {
                    failure = Some(err);
                    true
                }
                Poll::Pending => true,
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }

        if self.pending.is_empty() && !self.complete {
            self.complete = true;
            log::info!("All {} animations loaded", self.total);
            events.push(LoadEvent::AnimationsReady(std::mem::take(&mut self.loaded)));
        }

        Ok(events)
    }

    /// Whether the clips have been handed over
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of clips resolved so far and the number requested
    pub fn progress(&self) -> (usize, usize) {
        (self.total - self.pending.len(), self.total)
    }
}
