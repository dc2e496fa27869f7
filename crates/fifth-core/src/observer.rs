//! Observation events emitted by the stack engine.
//!
//! The engine reports every change through an [`Observer`]: one
//! [`Observation::Snapshot`] for the initial state, then an
//! [`Observation::Applied`] and a [`Observation::Snapshot`] per successful
//! command. Observers are side channels; they never affect stack state.

use std::fmt;

use tracing::info;

use crate::command::Command;

/// A single notification from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// A command was just applied.
    Applied(Command),

    /// The stack contents after the preceding event.
    Snapshot(Vec<i64>),
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied(command @ (Command::Pop | Command::Swap | Command::Dup)) => {
                write!(f, "Command: {command}")
            }
            Self::Applied(command) => write!(f, "{command}"),
            Self::Snapshot(values) => write!(f, "Stack is {values:?}"),
        }
    }
}

/// Receives engine observations in the order they happen.
pub trait Observer {
    fn observe(&mut self, observation: Observation);
}

/// Discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _observation: Observation) {}
}

/// Forwards observations to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&mut self, observation: Observation) {
        match &observation {
            Observation::Applied(command) => {
                info!(command = command.name(), "{observation}");
            }
            Observation::Snapshot(values) => {
                info!(depth = values.len(), "{observation}");
            }
        }
    }
}

/// Records observations, mostly useful in tests.
impl Observer for Vec<Observation> {
    fn observe(&mut self, observation: Observation) {
        self.push(observation);
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, observation: Observation) {
        (**self).observe(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_render_stack_manipulation_with_command_prefix() {
        assert_eq!(Observation::Applied(Command::Pop).to_string(), "Command: POP");
        assert_eq!(Observation::Applied(Command::Swap).to_string(), "Command: SWAP");
        assert_eq!(Observation::Applied(Command::Dup).to_string(), "Command: DUP");
    }

    #[test]
    fn test_should_render_push_and_arithmetic_plainly() {
        assert_eq!(Observation::Applied(Command::Push(35)).to_string(), "PUSH 35");
        assert_eq!(Observation::Applied(Command::Add).to_string(), "ADD");
        assert_eq!(Observation::Applied(Command::Divide).to_string(), "DIVIDE");
    }

    #[test]
    fn test_should_render_snapshot() {
        assert_eq!(
            Observation::Snapshot(vec![12, 23, 34]).to_string(),
            "Stack is [12, 23, 34]"
        );
        assert_eq!(Observation::Snapshot(vec![]).to_string(), "Stack is []");
    }

    #[test]
    fn test_should_record_into_vec_through_mut_ref() {
        fn emit<O: Observer>(mut observer: O) {
            observer.observe(Observation::Applied(Command::Dup));
        }

        let mut events: Vec<Observation> = Vec::new();
        emit(&mut events);
        assert_eq!(events, vec![Observation::Applied(Command::Dup)]);
    }
}
