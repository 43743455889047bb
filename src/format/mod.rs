//! Text rendering of expressions.

pub mod expr;

pub use expr::pretty;
