// Key bindings for the character actions

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps keys to character actions
///
/// Several keys may drive one action (WASD and the arrows), but each key
/// drives at most one action.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
    /// Every source bound to each action, kept in sync with `bindings`
    sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create a configuration with nothing bound
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            sources: HashMap::new(),
        }
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (InputSource, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind a key to an action, replacing whatever it drove before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind(source);
        self.bindings.insert(source, action);
        self.sources.entry(action).or_default().push(source);
    }

    /// Remove a key's binding, returning the action it drove
    pub fn unbind(&mut self, source: InputSource) -> Option<Action> {
        let action = self.bindings.remove(&source)?;
        if let Some(sources) = self.sources.get_mut(&action) {
            sources.retain(|bound| *bound != source);
            if sources.is_empty() {
                self.sources.remove(&action);
            }
        }
        Some(action)
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Every key bound to `action`
    pub fn get_sources(&self, action: Action) -> &[InputSource] {
        self.sources.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    #[allow(dead_code)]
    pub fn has_binding(&self, action: Action) -> bool {
        self.sources.contains_key(&action)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
