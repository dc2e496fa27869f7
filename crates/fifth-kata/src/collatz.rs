//! Collatz step counter.

use tracing::{instrument, trace};

use crate::error::KataError;

/// Count the steps the Collatz sequence starting at `n` needs to reach 1.
///
/// Even values are halved, odd values become `3n + 1`. Values of 1 or less
/// take no steps.
///
/// # Errors
///
/// Returns `KataError::Overflow` if `3n + 1` does not fit in `u64`.
#[instrument]
pub fn collatz_steps(n: u64) -> Result<u64, KataError> {
    let mut value = n;
    let mut steps = 0;

    while value > 1 {
        value = if value % 2 == 0 {
            value / 2
        } else {
            value
                .checked_mul(3)
                .and_then(|v| v.checked_add(1))
                .ok_or(KataError::Overflow { value, steps })?
        };
        steps += 1;
        trace!(steps, value, "collatz step");
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_count_steps_for_known_inputs() {
        assert_eq!(collatz_steps(35), Ok(13));
        assert_eq!(collatz_steps(8), Ok(3));
        assert_eq!(collatz_steps(10), Ok(6));
        assert_eq!(collatz_steps(27), Ok(111));
    }

    #[test]
    fn test_should_take_no_steps_at_or_below_one() {
        assert_eq!(collatz_steps(1), Ok(0));
        assert_eq!(collatz_steps(0), Ok(0));
    }

    #[test]
    fn test_should_report_overflow() {
        let odd = u64::MAX;
        assert_eq!(
            collatz_steps(odd),
            Err(KataError::Overflow {
                value: odd,
                steps: 0
            })
        );
    }
}
