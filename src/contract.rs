//! Index contraction over products, driven to a fixed point by [`simplify_indexed`].

use std::collections::BTreeMap;

use crate::clifford;
use crate::error::{AlgebraError, Result};
use crate::expr::{Base, Expr, Indexed, one, zero};
use crate::limits::Limits;
use crate::simplify::expand;
use crate::tensor::{self, Symmetry};

/// Values of contracted vector pairs `a.mu * b~mu`, keyed symmetrically in the two names.
#[derive(Clone, Debug, Default)]
pub struct ScalarProducts {
    table: BTreeMap<(String, String), Expr>,
}

impl ScalarProducts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, a: &str, b: &str, value: Expr) {
        self.table.insert(key(a, b), value);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&Expr> {
        self.table.get(&key(a, b))
    }

    /// Value of the product of two single-index vectors whose indices form a dummy pair.
    fn evaluate(&self, left: &Expr, right: &Expr) -> Option<Expr> {
        let (Some((a, ia)), Some((b, ib))) = (as_vector(left), as_vector(right)) else {
            return None;
        };
        if !ia.is_dummy_pair(ib) {
            return None;
        }
        self.get(a, b).cloned()
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn as_vector(expr: &Expr) -> Option<(&str, &crate::index::Index)> {
    match expr {
        Expr::Indexed(Indexed {
            base: Base::Symbol(name),
            indices,
        }) if indices.len() == 1 => Some((name.as_str(), &indices[0])),
        _ => None,
    }
}

/// Contract all dummy index pairs of `expr` and simplify the result.
pub fn simplify_indexed(expr: &Expr, products: &ScalarProducts) -> Result<Expr> {
    simplify_indexed_with_limits(expr, products, &Limits::default())
}

pub fn simplify_indexed_with_limits(
    expr: &Expr,
    products: &ScalarProducts,
    limits: &Limits,
) -> Result<Expr> {
    let mut current = expand(expr);
    for pass in 0..limits.max_passes {
        let mut changed = false;
        let next = Expr::sum(current.terms().into_iter().map(|term| {
            let (contracted, fired) = contract_term(term, products);
            changed |= fired;
            contracted
        }));
        if !changed {
            tracing::debug!(target: "contract", passes = pass, "fixed point reached");
            return Ok(next);
        }
        current = expand(&next);
    }
    Err(AlgebraError::NoFixedPoint {
        passes: limits.max_passes,
    })
}

/// Split a monomial into its factors, with Clifford words flattened into single generators.
fn unpack(term: Expr) -> Vec<Expr> {
    let factors = match term {
        Expr::Mul(factors) => factors,
        other => vec![other],
    };
    let mut out = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor {
            Expr::NcMul(_, items) => out.extend(items),
            other => out.push(other),
        }
    }
    out
}

fn holds_sum(expr: &Expr) -> bool {
    match expr {
        Expr::Add(_) => true,
        Expr::Mul(items) | Expr::NcMul(_, items) => items.iter().any(holds_sum),
        _ => false,
    }
}

/// Apply contraction rules to one monomial until none fires or a sum appears.
fn contract_term(term: Expr, products: &ScalarProducts) -> (Expr, bool) {
    let mut factors = unpack(term);
    let mut changed = false;
    loop {
        if !contract_once(&mut factors, products) {
            return (Expr::product(factors), changed);
        }
        changed = true;
        let rebuilt = Expr::product(factors);
        if rebuilt.is_zero() || holds_sum(&rebuilt) {
            return (rebuilt, true);
        }
        factors = unpack(rebuilt);
    }
}

fn contract_once(factors: &mut [Expr], products: &ScalarProducts) -> bool {
    for i in 0..factors.len() {
        for j in i + 1..factors.len() {
            if !factors[i].shares_dummy_with(&factors[j]) {
                continue;
            }
            if let Some(value) = products.evaluate(&factors[i], &factors[j]) {
                tracing::trace!(target: "contract", "scalar product {} * {}", factors[i], factors[j]);
                factors[i] = value;
                factors[j] = one();
                return true;
            }
            if symmetric_into_antisymmetric(&factors[i], &factors[j]) {
                factors[i] = zero();
                return true;
            }
            if contract_with(factors, i, j) || contract_with(factors, j, i) {
                return true;
            }
        }
    }
    false
}

fn contract_with(factors: &mut [Expr], this: usize, other: usize) -> bool {
    let tensor = match &factors[this] {
        Expr::Indexed(Indexed {
            base: Base::Tensor(t),
            ..
        }) => Some(*t),
        Expr::Clifford(_) => None,
        _ => return false,
    };
    match tensor {
        Some(t) => tensor::contract_with(t, factors, this, other),
        None => clifford::contract::contract_with(factors, this, other),
    }
}

/// A symmetric tensor whose every index is contracted into the same antisymmetric tensor.
fn symmetric_into_antisymmetric(a: &Expr, b: &Expr) -> bool {
    let check = |sym: &Expr, anti: &Expr| match (sym, anti) {
        (
            Expr::Indexed(Indexed {
                base: Base::Tensor(s),
                indices: s_idx,
            }),
            Expr::Indexed(Indexed {
                base: Base::Tensor(t),
                indices: t_idx,
            }),
        ) => {
            s.symmetry() == Symmetry::Symmetric
                && t.symmetry() == Symmetry::Antisymmetric
                && s_idx
                    .iter()
                    .all(|x| t_idx.iter().any(|y| x.is_dummy_pair(y)))
        }
        _ => false,
    };
    check(a, b) || check(b, a)
}
