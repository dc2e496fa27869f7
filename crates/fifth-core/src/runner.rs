//! Command runner.
//!
//! Builds a [`Fifth`] engine over an initial stack and applies an ordered
//! list of commands, each exactly once. Execution stops at the first failing
//! command; the error carries its position, the command and the stack left
//! by the last successful one.

use tracing::{debug, instrument, warn};

use crate::command::Command;
use crate::error::CoreError;
use crate::observer::Observer;
use crate::stack::{Fifth, Stack};

/// Run `commands` in order against a stack seeded with `initial`.
///
/// The observer first receives the initial snapshot, then one
/// `Applied`/`Snapshot` pair per successful command.
///
/// # Examples
///
/// ```
/// use fifth_core::{Command, NoopObserver, run};
///
/// let stack = run(vec![10, 11, 13, 14, 28], [Command::Add], NoopObserver)?;
/// assert_eq!(stack, vec![10, 11, 13, 42]);
/// # Ok::<(), fifth_core::CoreError>(())
/// ```
///
/// # Errors
///
/// Returns `CoreError::Command` for the first command the engine rejects.
/// Later commands are not attempted.
#[instrument(skip_all)]
pub fn run<O, I>(initial: Vec<i64>, commands: I, observer: O) -> Result<Stack, CoreError>
where
    O: Observer,
    I: IntoIterator<Item = Command>,
{
    let mut fifth = Fifth::with_observer(initial, observer);

    for (index, command) in commands.into_iter().enumerate() {
        debug!(index, %command, "applying command");

        if let Err(source) = fifth.apply(command) {
            warn!(index, %command, error = %source, "command failed");
            return Err(CoreError::Command {
                index,
                command,
                stack: fifth.into_stack(),
                source,
            });
        }
    }

    Ok(fifth.into_stack())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StackError;
    use crate::observer::{NoopObserver, Observation};

    #[test]
    fn test_should_push_onto_initial_stack() {
        let stack = run(vec![12, 23, 34, 45, 67], [Command::Push(35)], NoopObserver)
            .expect("should run");
        assert_eq!(stack, vec![12, 23, 34, 45, 67, 35]);
    }

    #[test]
    fn test_should_pop_from_initial_stack() {
        let stack = run(vec![34, 45, 56, 67, 33, 72], [Command::Pop], NoopObserver)
            .expect("should run");
        assert_eq!(stack, vec![34, 45, 56, 67, 33]);
    }

    #[test]
    fn test_should_add_top_two_of_initial_stack() {
        let stack = run(vec![10, 11, 13, 14, 28], [Command::Add], NoopObserver)
            .expect("should run");
        assert_eq!(stack, vec![10, 11, 13, 42]);
    }

    #[test]
    fn test_should_divide_to_single_element() {
        let stack = run(vec![28, 14], [Command::Divide], NoopObserver).expect("should run");
        assert_eq!(stack, vec![2]);
    }

    #[test]
    fn test_should_fail_add_with_single_operand() {
        let err = run(vec![2], [Command::Add], NoopObserver).expect_err("should fail");
        assert_eq!(
            err.stack_error(),
            Some(StackError::InsufficientOperands { operator: "+" })
        );
    }

    #[test]
    fn test_should_return_initial_stack_for_empty_command_list() {
        let stack = run(vec![1, 2, 3], Vec::<Command>::new(), NoopObserver).expect("should run");
        assert_eq!(stack, vec![1, 2, 3]);
    }

    #[test]
    fn test_should_stop_at_first_failure() {
        let mut events: Vec<Observation> = Vec::new();
        let commands = [
            Command::Push(4),
            Command::Push(0),
            Command::Divide,
            Command::Push(99),
        ];

        let err = run(vec![8], commands, &mut events).expect_err("should fail");

        match err {
            CoreError::Command {
                index,
                command,
                stack,
                source,
            } => {
                assert_eq!(index, 2);
                assert_eq!(command, Command::Divide);
                assert_eq!(stack, vec![8, 4, 0]);
                assert_eq!(source, StackError::DivisionByZero);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Nothing is emitted for the failed command or anything after it.
        assert_eq!(events.len(), 5);
        assert_eq!(events.last(), Some(&Observation::Snapshot(vec![8, 4, 0])));
    }

    #[test]
    fn test_should_emit_observations_in_application_order() {
        let mut events: Vec<Observation> = Vec::new();
        let stack = run(
            vec![3],
            [Command::Dup, Command::Multiply, Command::Push(1), Command::Subtract],
            &mut events,
        )
        .expect("should run");

        assert_eq!(stack, vec![8]);
        let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "Stack is [3]",
                "Command: DUP",
                "Stack is [3, 3]",
                "MULTIPLY",
                "Stack is [9]",
                "PUSH 1",
                "Stack is [9, 1]",
                "SUBTRACT",
                "Stack is [8]",
            ]
        );
    }

    #[test]
    fn test_should_fail_pop_on_empty_initial_stack() {
        let err = run(Vec::new(), [Command::Pop], NoopObserver).expect_err("should fail");
        assert!(matches!(
            err,
            CoreError::Command {
                index: 0,
                source: StackError::EmptyStack { .. },
                ..
            }
        ));
    }
}
