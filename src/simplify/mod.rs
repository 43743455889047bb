//! Expansion and substitution utilities.

mod expand;
mod substitute;

pub use expand::expand;
pub use substitute::{substitute, substitute_index};
