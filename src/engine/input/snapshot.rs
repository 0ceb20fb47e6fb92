// Level-triggered key state

use super::action::Action;

/// Which character inputs are physically held right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Dance key
    pub action: bool,
    /// Sprint key
    pub modifier: bool,
}

impl InputSnapshot {
    /// Check if an action is held
    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Action => self.action,
            Action::Modifier => self.modifier,
        }
    }

    /// Set the held state of an action
    pub fn set(&mut self, action: Action, held: bool) {
        let slot = match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Action => &mut self.action,
            Action::Modifier => &mut self.modifier,
        };
        *slot = held;
    }

    /// Forward or backward is held
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward
    }

    /// Snapshot with the given actions held
    #[allow(dead_code)]
    pub fn with(actions: &[Action]) -> Self {
        let mut snapshot = Self::default();
        for action in actions {
            snapshot.set(*action, true);
        }
        snapshot
    }
}
