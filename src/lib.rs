//! Symbolic rewriting of Dirac gamma matrices and index-carrying tensors: word normalization,
//! index contraction, canonical ordering and traces.

pub mod clifford;
pub mod contract;
pub mod error;
pub mod expr;
pub mod format;
pub mod index;
pub mod limits;
pub mod number;
pub mod parser;
pub mod perm;
pub mod simplify;
pub mod tensor;

pub use clifford::{
    Clifford, Dirac, canonicalize_clifford, canonicalize_clifford_with_limits, dirac_gamma,
    dirac_gamma5, dirac_gamma6, dirac_gamma7, dirac_one, dirac_slash, dirac_trace,
    dirac_trace_with_limits,
};
pub use contract::{ScalarProducts, simplify_indexed, simplify_indexed_with_limits};
pub use error::{AlgebraError, Result};
pub use expr::{Base, Expr, Indexed, one, zero};
pub use format::pretty;
pub use index::{Dim, Index, IndexKind, IndexValue};
pub use limits::Limits;
pub use number::Number;
pub use parser::{parse_expr, parse_expr_with_dim};
pub use perm::permutation_sign;
pub use simplify::{expand, substitute};
pub use tensor::{
    Tensor, delta_tensor, epsilon_tensor, lorentz_eps, lorentz_g, metric_tensor, spinor_metric,
};
