//! Dirac gamma matrices: generators, word normalization, contraction identities, canonical
//! ordering and traces.

pub(crate) mod canonicalize;
pub(crate) mod contract;
pub(crate) mod normalize;
pub(crate) mod trace;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{AlgebraError, Result};
use crate::expr::Expr;
use crate::index::{Dim, Index};

pub use canonicalize::{canonicalize_clifford, canonicalize_clifford_with_limits};
pub use trace::{dirac_trace, dirac_trace_with_limits};

/// A single generator of the Clifford algebra.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Dirac {
    One,
    Gamma(Index),
    Gamma5,
}

/// A generator tagged with its representation label. Factors with different labels belong to
/// independent algebras and commute with each other.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Clifford {
    pub label: u8,
    pub kind: Dirac,
}

impl Clifford {
    pub fn one(label: u8) -> Self {
        Clifford {
            label,
            kind: Dirac::One,
        }
    }

    pub fn gamma5(label: u8) -> Self {
        Clifford {
            label,
            kind: Dirac::Gamma5,
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self.kind, Dirac::One)
    }

    pub fn is_gamma5(&self) -> bool {
        matches!(self.kind, Dirac::Gamma5)
    }

    pub fn gamma_index(&self) -> Option<&Index> {
        match &self.kind {
            Dirac::Gamma(index) => Some(index),
            _ => None,
        }
    }
}

static SLASH_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn dirac_one(label: u8) -> Expr {
    Expr::Clifford(Clifford::one(label))
}

pub fn dirac_gamma(index: Index, label: u8) -> Result<Expr> {
    if !index.is_varying() {
        return Err(AlgebraError::InvalidIndex(format!(
            "index {index} of a Dirac gamma must be a varying index"
        )));
    }
    Ok(Expr::Clifford(Clifford {
        label,
        kind: Dirac::Gamma(index),
    }))
}

pub fn dirac_gamma5(label: u8) -> Expr {
    Expr::Clifford(Clifford::gamma5(label))
}

/// `One + Gamma5`, twice the right-handed projector.
pub fn dirac_gamma6(label: u8) -> Expr {
    dirac_one(label) + dirac_gamma5(label)
}

/// `One - Gamma5`, twice the left-handed projector.
pub fn dirac_gamma7(label: u8) -> Expr {
    dirac_one(label) - dirac_gamma5(label)
}

/// `vector.mu * gamma~mu` with a freshly named index `mu` of dimension `dim`.
///
/// `vector` is a named vector or a linear combination of them with numeric coefficients, such
/// as `p + 2*q`. Anything else has no single object to carry the index and is rejected.
pub fn dirac_slash(vector: &Expr, dim: Dim, label: u8) -> Result<Expr> {
    let n = SLASH_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mu = Index::varying(format!("_s{n}"), dim);
    let contracted = attach_index(vector, &mu.toggle_variance())?;
    Ok(contracted * dirac_gamma(mu, label)?)
}

fn attach_index(vector: &Expr, index: &Index) -> Result<Expr> {
    match vector {
        Expr::Symbol(name) => Ok(Expr::vector(name.clone(), index.clone())),
        Expr::Add(terms) => terms
            .iter()
            .map(|t| attach_index(t, index))
            .collect::<Result<Vec<_>>>()
            .map(Expr::sum),
        Expr::Mul(factors) => match factors.as_slice() {
            [Expr::Number(c), rest] => Ok(Expr::number(c.clone()) * attach_index(rest, index)?),
            _ => Err(AlgebraError::Unsupported(format!("slash of non-vector {vector}"))),
        },
        _ => Err(AlgebraError::Unsupported(format!("slash of non-vector {vector}"))),
    }
}
