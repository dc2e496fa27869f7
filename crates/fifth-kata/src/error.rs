use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KataError {
    #[error("collatz sequence overflowed u64 after {steps} steps at {value}")]
    Overflow { value: u64, steps: u64 },
}
