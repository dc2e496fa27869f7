//! Stack engine.
//!
//! [`Fifth`] owns an ordered sequence of integers (top of stack is the last
//! element) and implements the eight primitive operations. Every operation is
//! atomic: it either mutates the stack once and reports the change to the
//! observer, or fails with a [`StackError`] and leaves the contents untouched.

use std::fmt;
use std::ops::Deref;

use crate::command::Command;
use crate::error::StackError;
use crate::observer::{NoopObserver, Observation, Observer};

/// Final stack contents, bottom first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack(Vec<i64>);

impl Stack {
    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }

    /// Top of stack, if any.
    pub fn top(&self) -> Option<i64> {
        self.0.last().copied()
    }
}

impl Deref for Stack {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Stack {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

impl PartialEq<Vec<i64>> for Stack {
    fn eq(&self, other: &Vec<i64>) -> bool {
        &self.0 == other
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// The Fifth stack engine.
///
/// Construction reports the initial contents as a snapshot; each successful
/// operation then reports the applied command followed by the new snapshot.
///
/// # Examples
///
/// ```
/// use fifth_core::Fifth;
///
/// let mut fifth = Fifth::new(vec![28, 14]);
/// fifth.divide()?;
/// assert_eq!(fifth.values(), &[2]);
/// # Ok::<(), fifth_core::StackError>(())
/// ```
#[derive(Debug)]
pub struct Fifth<O: Observer = NoopObserver> {
    values: Vec<i64>,
    observer: O,
}

impl Fifth<NoopObserver> {
    /// Create an engine that reports to nobody.
    pub fn new(initial: Vec<i64>) -> Self {
        Self::with_observer(initial, NoopObserver)
    }
}

impl<O: Observer> Fifth<O> {
    /// Create an engine over `values` and report its contents to `observer`.
    pub fn with_observer(values: Vec<i64>, mut observer: O) -> Self {
        observer.observe(Observation::Snapshot(values.clone()));
        Self { values, observer }
    }

    /// Current contents, bottom first.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_stack(self) -> Stack {
        Stack(self.values)
    }

    /// Apply a single command through the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the [`StackError`] of the underlying operation.
    pub fn apply(&mut self, command: Command) -> Result<(), StackError> {
        match command {
            Command::Push(value) => {
                self.push(value);
                Ok(())
            }
            Command::Pop => self.pop(),
            Command::Swap => self.swap(),
            Command::Dup => self.dup(),
            Command::Add => self.add(),
            Command::Subtract => self.subtract(),
            Command::Multiply => self.multiply(),
            Command::Divide => self.divide(),
        }
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
        self.emit(Command::Push(value));
    }

    /// Remove the top element.
    ///
    /// # Errors
    ///
    /// Returns `StackError::EmptyStack` when there is nothing to remove.
    pub fn pop(&mut self) -> Result<(), StackError> {
        if self.values.pop().is_none() {
            return Err(StackError::EmptyStack { command: "POP" });
        }
        self.emit(Command::Pop);
        Ok(())
    }

    /// Exchange the top two elements.
    ///
    /// # Errors
    ///
    /// Returns `StackError::InsufficientOperands` with fewer than two elements.
    pub fn swap(&mut self) -> Result<(), StackError> {
        let len = self.values.len();
        if len < 2 {
            return Err(StackError::InsufficientOperands { operator: "SWAP" });
        }
        self.values.swap(len - 2, len - 1);
        self.emit(Command::Swap);
        Ok(())
    }

    /// Push a copy of the top element.
    ///
    /// # Errors
    ///
    /// Returns `StackError::EmptyStack` when there is nothing to copy.
    pub fn dup(&mut self) -> Result<(), StackError> {
        let Some(&top) = self.values.last() else {
            return Err(StackError::EmptyStack { command: "DUP" });
        };
        self.values.push(top);
        self.emit(Command::Dup);
        Ok(())
    }

    /// # Errors
    ///
    /// `InsufficientOperands` with fewer than two elements, `Overflow` if the
    /// sum leaves the `i64` range.
    pub fn add(&mut self) -> Result<(), StackError> {
        self.binary(Command::Add, |lhs, rhs| {
            lhs.checked_add(rhs)
                .ok_or(StackError::Overflow { operator: "+" })
        })
    }

    /// Replace the top two elements with `second - top`.
    ///
    /// # Errors
    ///
    /// `InsufficientOperands` with fewer than two elements, `Overflow` if the
    /// difference leaves the `i64` range.
    pub fn subtract(&mut self) -> Result<(), StackError> {
        self.binary(Command::Subtract, |lhs, rhs| {
            lhs.checked_sub(rhs)
                .ok_or(StackError::Overflow { operator: "-" })
        })
    }

    /// # Errors
    ///
    /// `InsufficientOperands` with fewer than two elements, `Overflow` if the
    /// product leaves the `i64` range.
    pub fn multiply(&mut self) -> Result<(), StackError> {
        self.binary(Command::Multiply, |lhs, rhs| {
            lhs.checked_mul(rhs)
                .ok_or(StackError::Overflow { operator: "*" })
        })
    }

    /// Replace the top two elements with `second / top`, rounded half to even.
    ///
    /// # Errors
    ///
    /// `InsufficientOperands` with fewer than two elements, `DivisionByZero`
    /// when the top is zero, `Overflow` for `i64::MIN / -1`.
    pub fn divide(&mut self) -> Result<(), StackError> {
        self.binary(Command::Divide, |lhs, rhs| {
            if rhs == 0 {
                return Err(StackError::DivisionByZero);
            }
            div_round_half_even(lhs, rhs).ok_or(StackError::Overflow { operator: "/" })
        })
    }

    /// Replace the top two elements with `op(second, top)`.
    fn binary(
        &mut self,
        command: Command,
        op: impl FnOnce(i64, i64) -> Result<i64, StackError>,
    ) -> Result<(), StackError> {
        let operator = command.operator().unwrap_or(command.name());
        let &[.., lhs, rhs] = self.values.as_slice() else {
            return Err(StackError::InsufficientOperands { operator });
        };

        let result = op(lhs, rhs)?;
        self.values.truncate(self.values.len() - 2);
        self.values.push(result);
        self.emit(command);
        Ok(())
    }

    fn emit(&mut self, command: Command) {
        self.observer.observe(Observation::Applied(command));
        self.observer
            .observe(Observation::Snapshot(self.values.clone()));
    }
}

/// Integer quotient rounded to the nearest value, ties to even.
///
/// `None` when the quotient does not fit in `i64`. `rhs` must be non-zero.
fn div_round_half_even(lhs: i64, rhs: i64) -> Option<i64> {
    let (n, d) = (i128::from(lhs), i128::from(rhs));
    let quotient = n / d;
    let remainder = n % d;

    let twice = 2 * remainder.abs();
    let round_away = twice > d.abs() || (twice == d.abs() && quotient % 2 != 0);

    let rounded = if remainder != 0 && round_away {
        if (n < 0) != (d < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    };

    i64::try_from(rounded).ok()
}
