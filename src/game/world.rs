// Scene driver
//
// Owns everything needed to run one animated character and steps it once
// per displayed frame.

use anyhow::{Context, Result};

use super::characters::{CharacterController, StateName};
use crate::engine::assets::{CharacterAssetSource, CharacterLoader, LoadEvent, StandardAssets};
use crate::engine::game_loop::GameLoop;
use crate::engine::input::InputManager;

/// The scene: one character, its assets, its input and the frame clock
pub struct World<S: CharacterAssetSource = StandardAssets> {
    loader: CharacterLoader<S>,
    input: InputManager,
    clock: GameLoop,
    character: CharacterController,
    /// State reported by the last frame, for change logging
    last_state: Option<StateName>,
}

impl World<StandardAssets> {
    /// Create a world that loads the built-in character
    pub fn new() -> Result<Self> {
        Self::with_source(StandardAssets, StandardAssets::clip_names())
    }
}

impl<S: CharacterAssetSource> World<S> {
    /// Create a world loading the named clips from `source`
    pub fn with_source<'a>(
        source: S,
        clip_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self> {
        let loader = CharacterLoader::new(source, clip_names)
            .context("Failed to request character assets")?;

        Ok(Self {
            loader,
            input: InputManager::new(),
            clock: GameLoop::new(),
            character: CharacterController::new(),
            last_state: None,
        })
    }

    /// Run one displayed frame with the wall-clock time since the last one
    pub fn frame(&mut self) -> Result<()> {
        let dt = self.clock.begin_frame();
        self.advance(dt)?;

        if self.clock.frame_count() % 600 == 0 {
            log::debug!("{:.1} fps", self.clock.fps());
        }
        Ok(())
    }

    /// Poll outstanding assets, then tick the character by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        if !self.loader.is_complete() {
            self.poll_assets()?;
        }

        self.character
            .tick(dt, self.input.snapshot())
            .context("Character update failed")?;

        let state = self.character.state_name();
        if state != self.last_state {
            if let Some(state) = state {
                log::info!("Character is now {}", state);
            }
            self.last_state = state;
        }
        Ok(())
    }

    fn poll_assets(&mut self) -> Result<()> {
        let events = self
            .loader
            .poll()
            .context("Failed to load character assets")?;

        for event in events {
            match event {
                LoadEvent::ModelReady(transform) => self.character.attach_target(transform),
                LoadEvent::AnimationsReady(clips) => self
                    .character
                    .assets_ready(clips)
                    .context("Failed to bind character animations")?,
            }
        }

        if !self.loader.is_complete() {
            let (loaded, total) = self.loader.progress();
            log::debug!("Loaded {}/{} animations", loaded, total);
        }
        Ok(())
    }

    /// Pause on focus loss and drop held keys, since their releases will not arrive
    pub fn set_focused(&mut self, focused: bool) {
        if focused {
            self.clock.resume();
        } else {
            self.input.reset();
            self.clock.pause();
        }
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    #[allow(dead_code)]
    pub fn character(&self) -> &CharacterController {
        &self.character
    }

    #[allow(dead_code)]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Transform;
    use crate::engine::animation::AnimationClip;
    use crate::engine::assets::AssetError;
    use std::collections::HashMap;
    use std::task::Poll;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    /// Delivers the model at once; the clip at position `i` resolves on its `i + 1`th poll
    struct TrickleSource {
        order: Vec<&'static str>,
        polls: HashMap<String, usize>,
    }

    impl TrickleSource {
        fn new(order: &[&'static str]) -> Self {
            Self {
                order: order.to_vec(),
                polls: HashMap::new(),
            }
        }
    }

    impl CharacterAssetSource for TrickleSource {
        fn poll_model(&mut self) -> Poll<Result<Transform, AssetError>> {
            Poll::Ready(Ok(Transform::IDENTITY))
        }

        fn poll_clip(&mut self, name: &str) -> Poll<Result<AnimationClip, AssetError>> {
            let Some(index) = self.order.iter().position(|clip| *clip == name) else {
                return Poll::Ready(Err(AssetError::NotFound(name.to_string())));
            };
            let polls = self.polls.entry(name.to_string()).or_insert(0);
            *polls += 1;
            if *polls > index {
                Poll::Ready(Ok(AnimationClip::new(name, 1.0)))
            } else {
                Poll::Pending
            }
        }
    }

    #[test]
    fn test_standard_world_starts_idle() {
        let mut world = World::new().unwrap();
        world.frame().unwrap();

        let character = world.character();
        assert!(character.target().is_some());
        assert_eq!(character.state_name(), Some(StateName::Idle));
    }

    #[test]
    fn test_keys_drive_the_character() {
        let mut world = World::new().unwrap();
        world.advance(0.0).unwrap();

        world
            .input_mut()
            .process_key(KeyCode::KeyW, ElementState::Pressed);
        world.advance(0.1).unwrap();
        assert_eq!(world.character().state_name(), Some(StateName::Walking));
        assert!(world.character().velocity().z > 0.0);

        world
            .input_mut()
            .process_key(KeyCode::KeyW, ElementState::Released);
        world.advance(0.1).unwrap();
        assert_eq!(world.character().state_name(), Some(StateName::Idle));
    }

    #[test]
    fn test_idle_waits_for_every_clip() {
        let names = ["idle", "walk", "run", "dance"];
        let mut world = World::with_source(TrickleSource::new(&names), names).unwrap();

        for _ in 0..3 {
            world.advance(0.016).unwrap();
            assert!(world.character().target().is_some());
            assert_eq!(world.character().state_name(), None);
        }

        world.advance(0.016).unwrap();
        assert_eq!(world.character().state_name(), Some(StateName::Idle));
    }

    #[test]
    fn test_load_failure_is_reported() {
        let source = TrickleSource::new(&["idle"]);
        let mut world = World::with_source(source, ["idle", "dance"]).unwrap();

        assert!(world.advance(0.016).is_err());
        assert_eq!(world.character().state_name(), None);
    }

    #[test]
    fn test_focus_loss_releases_keys_and_pauses() {
        let mut world = World::new().unwrap();
        world.advance(0.0).unwrap();
        world
            .input_mut()
            .process_key(KeyCode::KeyW, ElementState::Pressed);

        world.set_focused(false);
        assert!(world.is_paused());
        world.advance(0.1).unwrap();
        assert_eq!(world.character().state_name(), Some(StateName::Idle));

        world.set_focused(true);
        assert!(!world.is_paused());
    }
}
