// Character animation registry

use std::collections::HashMap;
use std::sync::Arc;

use super::state::StateName;
use crate::engine::animation::{ActionHandle, AnimationClip, AnimationError, AnimationMixer};

/// The action playing one state's clip on the character's mixer
#[derive(Debug, Clone, Copy)]
pub struct AnimationEntry {
    pub action: ActionHandle,
}

/// Maps every animated state to its clip and action
///
/// Built once when the character's clips finish loading and read-only
/// afterwards.
#[derive(Debug)]
pub struct AnimationRegistry {
    entries: HashMap<StateName, AnimationEntry>,
}

impl AnimationRegistry {
    /// Bind the loaded clips to actions on `mixer`
    ///
    /// `clips` is keyed by asset name. Every animated state needs a clip;
    /// nothing is added to the mixer unless all of them are present.
    pub fn build(
        mut clips: HashMap<String, AnimationClip>,
        mixer: &mut AnimationMixer,
    ) -> Result<Self, AnimationError> {
        if let Some(missing) = StateName::ANIMATED
            .iter()
            .find(|name| !clips.contains_key(name.asset_name()))
        {
            return Err(AnimationError::MissingEntry(missing.to_string()));
        }

        let mut entries = HashMap::with_capacity(StateName::ANIMATED.len());
        for name in StateName::ANIMATED {
            let Some(clip) = clips.remove(name.asset_name()) else {
                return Err(AnimationError::MissingEntry(name.to_string()));
            };
            let action = mixer.clip_action(Arc::new(clip));
            entries.insert(name, AnimationEntry { action });
        }

        for unused in clips.keys() {
            log::warn!("Ignoring animation '{}' with no matching state", unused);
        }

        Ok(Self { entries })
    }

    /// Look up the entry for a state
    pub fn get(&self, name: StateName) -> Result<&AnimationEntry, AnimationError> {
        self.entries
            .get(&name)
            .ok_or_else(|| AnimationError::MissingEntry(name.to_string()))
    }

    /// Number of registered states
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clips(names: &[(&str, f32)]) -> HashMap<String, AnimationClip> {
        names
            .iter()
            .map(|(name, duration)| (name.to_string(), AnimationClip::new(name, *duration)))
            .collect()
    }

    #[test]
    fn test_build_binds_every_state() {
        let mut mixer = AnimationMixer::new();
        let registry = AnimationRegistry::build(
            clips(&[("idle", 4.0), ("walk", 1.0), ("run", 0.8), ("dance", 2.0)]),
            &mut mixer,
        )
        .unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(mixer.len(), 4);
        for name in StateName::ANIMATED {
            let entry = registry.get(name).unwrap();
            assert_eq!(mixer.action(entry.action).unwrap().clip().name, name.asset_name());
        }
    }

    #[test]
    fn test_build_requires_all_clips() {
        let mut mixer = AnimationMixer::new();
        let result = AnimationRegistry::build(
            clips(&[("idle", 4.0), ("walk", 1.0), ("run", 0.8)]),
            &mut mixer,
        );

        assert!(matches!(result, Err(AnimationError::MissingEntry(name)) if name == "dance"));
        assert!(mixer.is_empty());
    }

    #[test]
    fn test_reserved_state_has_no_entry() {
        let mut mixer = AnimationMixer::new();
        let registry = AnimationRegistry::build(
            clips(&[
                ("idle", 4.0),
                ("walk", 1.0),
                ("run", 0.8),
                ("dance", 2.0),
                ("wave", 1.5),
            ]),
            &mut mixer,
        )
        .unwrap();

        assert!(matches!(
            registry.get(StateName::Jump),
            Err(AnimationError::MissingEntry(_))
        ));
        // Unmatched clips are not bound
        assert_eq!(mixer.len(), 4);
    }
}
