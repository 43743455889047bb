use crate::clifford::{Clifford, Dirac};
use crate::expr::{Base, Expr, Indexed};
use crate::index::Index;

/// Substitute symbol `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Symbol(name) if name == var => replacement.clone(),
        Expr::Add(terms) => Expr::sum(terms.iter().map(|t| substitute(t, var, replacement))),
        Expr::Mul(factors) | Expr::NcMul(_, factors) => {
            Expr::product(factors.iter().map(|f| substitute(f, var, replacement)))
        }
        _ => expr.clone(),
    }
}

/// Replace every occurrence of index `from` (exact match, including variance and dimension)
/// by `to`. Tensors are re-evaluated and words re-normalized on the way back up.
pub fn substitute_index(expr: &Expr, from: &Index, to: &Index) -> Expr {
    match expr {
        Expr::Indexed(ix) if ix.indices.contains(from) => {
            let indices = ix
                .indices
                .iter()
                .map(|i| if i == from { to.clone() } else { i.clone() })
                .collect();
            match &ix.base {
                Base::Tensor(tensor) => tensor.build(indices),
                Base::Symbol(_) => Expr::Indexed(Indexed {
                    base: ix.base.clone(),
                    indices,
                }),
            }
        }
        Expr::Clifford(Clifford {
            label,
            kind: Dirac::Gamma(index),
        }) if index == from => Expr::Clifford(Clifford {
            label: *label,
            kind: Dirac::Gamma(to.clone()),
        }),
        Expr::Add(terms) => Expr::sum(terms.iter().map(|t| substitute_index(t, from, to))),
        Expr::Mul(factors) | Expr::NcMul(_, factors) => {
            Expr::product(factors.iter().map(|f| substitute_index(f, from, to)))
        }
        _ => expr.clone(),
    }
}
