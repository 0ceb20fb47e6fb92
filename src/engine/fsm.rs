/// Generic finite state machine
///
/// States are registered by name with a factory. Every transition builds a
/// fresh state value, so each entry recomputes its setup from scratch. The
/// hooks receive an explicit context instead of holding a reference back
/// to their owner.
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maximum number of transitions one `transition_to` call may chain through entry hooks
pub const MAX_TRANSITION_CHAIN: usize = 8;

/// State machine errors
#[derive(Debug, thiserror::Error)]
pub enum StateMachineError {
    #[error("State was never registered: {0}")]
    Unregistered(String),

    #[error("Entry hooks chained more than {0} transitions")]
    TransitionLoop(usize),
}

/// Behaviour of one state in a [`StateMachine`]
pub trait State: Sized {
    /// Closed set of state names
    type Name: Copy + Eq + Hash + Debug;
    /// Per-tick input the state reads when deciding its next state
    type Input;
    /// Data the hooks act on (animation registry, mixer, ...)
    type Context<'a>;
    type Error: From<StateMachineError>;

    fn name(&self) -> Self::Name;

    /// Called after the state becomes active. `previous` is the state that
    /// was just exited, still readable. May request an immediate follow-up
    /// transition.
    fn enter(
        &mut self,
        previous: Option<&Self>,
        ctx: &mut Self::Context<'_>,
    ) -> Result<Option<Self::Name>, Self::Error>;

    /// Called once per tick while active. Returns the state to move to, if any.
    fn update(
        &mut self,
        dt: f32,
        input: &Self::Input,
        ctx: &mut Self::Context<'_>,
    ) -> Result<Option<Self::Name>, Self::Error>;

    /// Called right before the state is replaced
    fn exit(&mut self, ctx: &mut Self::Context<'_>);
}

/// Holds at most one active state and dispatches transitions between them
pub struct StateMachine<S: State> {
    factories: HashMap<S::Name, fn() -> S>,
    current: Option<S>,
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateMachine<S> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            current: None,
        }
    }

    /// Associate a state name with the factory that builds it
    pub fn register_state(&mut self, name: S::Name, factory: fn() -> S) {
        self.factories.insert(name, factory);
    }

    /// The active state, if any
    #[allow(dead_code)]
    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Name of the active state, if any
    pub fn current_name(&self) -> Option<S::Name> {
        self.current.as_ref().map(State::name)
    }

    /// Make `name` the active state
    ///
    /// Requesting the active state again does nothing. Otherwise the active
    /// state is exited, a new one is built and entered with the exited state
    /// as `previous`. A follow-up requested by the entry hook replaces the
    /// new state the same way instead of nesting.
    ///
    /// If an entry hook fails, the exited state is gone and the failed one is
    /// not installed, so the machine is left with no active state.
    pub fn transition_to(
        &mut self,
        name: S::Name,
        ctx: &mut S::Context<'_>,
    ) -> Result<(), S::Error> {
        let mut pending = Some(name);
        let mut hops = 0;

        while let Some(name) = pending.take() {
            if self.current_name() == Some(name) {
                return Ok(());
            }

            hops += 1;
            if hops > MAX_TRANSITION_CHAIN {
                return Err(StateMachineError::TransitionLoop(MAX_TRANSITION_CHAIN).into());
            }

            let factory = self
                .factories
                .get(&name)
                .ok_or_else(|| StateMachineError::Unregistered(format!("{name:?}")))?;
            let mut next = factory();

            let mut previous = self.current.take();
            if let Some(state) = previous.as_mut() {
                state.exit(ctx);
            }

            log::debug!(
                "State transition: {:?} -> {:?}",
                previous.as_ref().map(State::name),
                name
            );

            match next.enter(previous.as_ref(), ctx) {
                Ok(follow_up) => {
                    self.current = Some(next);
                    pending = follow_up;
                }
                Err(err) => {
                    log::warn!("Entering {:?} failed; no state is active", name);
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Run the active state's update hook and apply any transition it requests
    ///
    /// Does nothing while no state is active.
    pub fn update(
        &mut self,
        dt: f32,
        input: &S::Input,
        ctx: &mut S::Context<'_>,
    ) -> Result<(), S::Error> {
        let Some(state) = self.current.as_mut() else {
            return Ok(());
        };

        if let Some(next) = state.update(dt, input, ctx)? {
            self.transition_to(next, ctx)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Red,
        Green,
        Yellow,
        Blink,
        Unused,
    }

    /// Records every hook call so ordering can be checked
    struct Recorded {
        name: Light,
    }

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
        /// Entering this state fails
        reject: Option<Light>,
    }

    impl State for Recorded {
        type Name = Light;
        type Input = bool;
        type Context<'a> = Log;
        type Error = StateMachineError;

        fn name(&self) -> Light {
            self.name
        }

        fn enter(
            &mut self,
            previous: Option<&Self>,
            ctx: &mut Log,
        ) -> Result<Option<Light>, StateMachineError> {
            ctx.calls
                .push(format!("enter {:?} from {:?}", self.name, previous.map(|p| p.name)));
            if ctx.reject == Some(self.name) {
                return Err(StateMachineError::Unregistered(format!("{:?}", self.name)));
            }
            // Yellow immediately hands over to Red; Blink and Unused bounce forever
            Ok(match self.name {
                Light::Yellow => Some(Light::Red),
                Light::Blink => Some(Light::Unused),
                Light::Unused => Some(Light::Blink),
                _ => None,
            })
        }

        fn update(
            &mut self,
            _dt: f32,
            advance: &bool,
            ctx: &mut Log,
        ) -> Result<Option<Light>, StateMachineError> {
            ctx.calls.push(format!("update {:?}", self.name));
            Ok(match (self.name, *advance) {
                (Light::Red, true) => Some(Light::Green),
                (Light::Green, true) => Some(Light::Yellow),
                _ => None,
            })
        }

        fn exit(&mut self, ctx: &mut Log) {
            ctx.calls.push(format!("exit {:?}", self.name));
        }
    }

    fn machine() -> StateMachine<Recorded> {
        let mut fsm = StateMachine::new();
        fsm.register_state(Light::Red, || Recorded { name: Light::Red });
        fsm.register_state(Light::Green, || Recorded { name: Light::Green });
        fsm.register_state(Light::Yellow, || Recorded { name: Light::Yellow });
        fsm
    }

    #[test]
    fn test_first_transition_has_no_previous() {
        let mut fsm = machine();
        let mut log = Log::default();

        assert!(fsm.current().is_none());
        fsm.transition_to(Light::Red, &mut log).unwrap();

        assert_eq!(fsm.current_name(), Some(Light::Red));
        assert_eq!(log.calls, vec!["enter Red from None"]);
    }

    #[test]
    fn test_exit_runs_once_before_enter() {
        let mut fsm = machine();
        let mut log = Log::default();

        fsm.transition_to(Light::Red, &mut log).unwrap();
        fsm.transition_to(Light::Green, &mut log).unwrap();

        assert_eq!(
            log.calls,
            vec!["enter Red from None", "exit Red", "enter Green from Some(Red)"]
        );
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut fsm = machine();
        let mut log = Log::default();

        fsm.transition_to(Light::Green, &mut log).unwrap();
        log.calls.clear();

        fsm.transition_to(Light::Green, &mut log).unwrap();
        assert!(log.calls.is_empty());
        assert_eq!(fsm.current_name(), Some(Light::Green));
    }

    #[test]
    fn test_unregistered_state_fails_without_side_effects() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.transition_to(Light::Red, &mut log).unwrap();
        log.calls.clear();

        let result = fsm.transition_to(Light::Unused, &mut log);
        assert!(matches!(result, Err(StateMachineError::Unregistered(name)) if name == "Unused"));
        assert!(log.calls.is_empty());
        assert_eq!(fsm.current_name(), Some(Light::Red));
    }

    #[test]
    fn test_failed_entry_leaves_no_active_state() {
        let mut fsm = machine();
        let mut log = Log {
            reject: Some(Light::Green),
            ..Log::default()
        };
        fsm.transition_to(Light::Red, &mut log).unwrap();
        log.calls.clear();

        assert!(fsm.transition_to(Light::Green, &mut log).is_err());
        assert!(fsm.current().is_none());
        assert_eq!(log.calls, vec!["exit Red", "enter Green from Some(Red)"]);

        // The machine can be restarted afterwards
        log.reject = None;
        fsm.transition_to(Light::Green, &mut log).unwrap();
        assert_eq!(fsm.current_name(), Some(Light::Green));
        assert_eq!(log.calls.last().unwrap(), "enter Green from None");
    }

    #[test]
    fn test_entry_follow_up_replaces_instead_of_nesting() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.transition_to(Light::Green, &mut log).unwrap();
        log.calls.clear();

        fsm.transition_to(Light::Yellow, &mut log).unwrap();

        assert_eq!(fsm.current_name(), Some(Light::Red));
        assert_eq!(
            log.calls,
            vec![
                "exit Green",
                "enter Yellow from Some(Green)",
                "exit Yellow",
                "enter Red from Some(Yellow)",
            ]
        );
    }

    #[test]
    fn test_update_without_active_state_is_noop() {
        let mut fsm = machine();
        let mut log = Log::default();

        fsm.update(0.1, &true, &mut log).unwrap();
        assert!(log.calls.is_empty());
        assert!(fsm.current().is_none());
    }

    #[test]
    fn test_update_applies_requested_transition() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.transition_to(Light::Red, &mut log).unwrap();

        fsm.update(0.1, &false, &mut log).unwrap();
        assert_eq!(fsm.current_name(), Some(Light::Red));

        fsm.update(0.1, &true, &mut log).unwrap();
        assert_eq!(fsm.current_name(), Some(Light::Green));
    }

    #[test]
    fn test_at_most_one_active_state_across_sequences() {
        let mut fsm = machine();
        let mut log = Log::default();
        let sequence = [
            Light::Red,
            Light::Red,
            Light::Green,
            Light::Yellow,
            Light::Green,
            Light::Green,
            Light::Red,
        ];

        for name in sequence {
            fsm.transition_to(name, &mut log).unwrap();
        }

        let enters = log.calls.iter().filter(|c| c.starts_with("enter")).count();
        let exits = log.calls.iter().filter(|c| c.starts_with("exit")).count();
        // Every enter except the currently active one has been matched by an exit
        assert_eq!(enters, exits + 1);

        // Exits and enters strictly alternate after the first enter
        for pair in log.calls[1..].chunks(2) {
            assert!(pair[0].starts_with("exit"));
            assert!(pair[1].starts_with("enter"));
        }
    }

    #[test]
    fn test_endless_entry_chain_is_reported() {
        let mut fsm = StateMachine::new();
        fsm.register_state(Light::Blink, || Recorded { name: Light::Blink });
        fsm.register_state(Light::Unused, || Recorded { name: Light::Unused });
        let mut log = Log::default();

        let result = fsm.transition_to(Light::Blink, &mut log);
        assert!(matches!(result, Err(StateMachineError::TransitionLoop(_))));
    }
}
