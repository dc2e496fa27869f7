mod collatz;
mod error;
mod roman;

pub use collatz::collatz_steps;
pub use error::KataError;
pub use roman::{roman_sum, roman_value};
