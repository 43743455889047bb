use crate::clifford::dirac_one;
use crate::error::Result;
use crate::expr::Expr;
use crate::limits::Limits;
use crate::simplify::expand;
use crate::tensor::Tensor;

/// Bring every gamma word into index order using the anticommutator
/// `gamma~a gamma~b = 2 g~a~b - gamma~b gamma~a`. A leading `Gamma5` stays in front.
pub fn canonicalize_clifford(expr: &Expr) -> Result<Expr> {
    canonicalize_clifford_with_limits(expr, &Limits::default())
}

pub fn canonicalize_clifford_with_limits(expr: &Expr, limits: &Limits) -> Result<Expr> {
    canonicalize(&expand(expr), limits, 0)
}

fn canonicalize(expr: &Expr, limits: &Limits, depth: usize) -> Result<Expr> {
    limits.check_depth(depth)?;
    let terms = expr
        .terms()
        .into_iter()
        .map(|term| canonicalize_term(term, limits, depth))
        .collect::<Result<Vec<_>>>()?;
    Ok(Expr::sum(terms))
}

fn canonicalize_term(term: Expr, limits: &Limits, depth: usize) -> Result<Expr> {
    let factors = match term {
        Expr::Mul(factors) => factors,
        other => vec![other],
    };
    for (pos, factor) in factors.iter().enumerate() {
        let Expr::NcMul(label, items) = factor else {
            continue;
        };
        let start = usize::from(items.first().and_then(Expr::as_clifford).is_some_and(|c| c.is_gamma5()));
        for i in start..items.len().saturating_sub(1) {
            let (Some(a), Some(b)) = (
                items[i].as_clifford().and_then(|c| c.gamma_index()),
                items[i + 1].as_clifford().and_then(|c| c.gamma_index()),
            ) else {
                continue;
            };
            if a <= b {
                continue;
            }
            tracing::trace!(target: "canonicalize", depth, "swapping {a} and {b}");
            let metric = Tensor::Minkowski { pos_sig: false }.build(vec![a.clone(), b.clone()]);

            let mut removed = items.clone();
            removed.drain(i..i + 2);
            let mut swapped = items.clone();
            swapped.swap(i, i + 1);
            let replacement = Expr::product(
                [Expr::integer(2), metric, dirac_one(*label)]
                    .into_iter()
                    .chain(removed),
            ) - Expr::product(swapped);

            let mut next = factors.clone();
            next[pos] = replacement;
            return canonicalize(&expand(&Expr::product(next)), limits, depth + 1);
        }
    }
    Ok(Expr::product(factors))
}
