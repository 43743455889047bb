use crate::clifford::Clifford;
use crate::expr::{Expr, one};
use crate::index::Index;
use crate::tensor::Tensor;

/// Contract the gamma at `this` with a later gamma of the same word carrying the paired index,
/// using the identity that matches the number of gammas between them.
pub(crate) fn contract_with(factors: &mut [Expr], this: usize, other: usize) -> bool {
    if other <= this {
        return false;
    }
    let Some((label, mu, mu_other)) = gamma_pair(&factors[this], &factors[other]) else {
        return false;
    };
    if !mu.is_dummy_pair(&mu_other) {
        return false;
    }
    let between: Option<Vec<Clifford>> = factors[this + 1..other]
        .iter()
        .map(|f| {
            f.as_clifford()
                .filter(|c| c.label == label && c.gamma_index().is_some())
                .cloned()
        })
        .collect();
    let Some(between) = between else {
        return false;
    };
    let Ok(dim) = mu.minimal_dim(&mu_other) else {
        return false;
    };
    let dim = dim.to_expr();
    let gap = between.len();
    tracing::trace!(target: "clifford", gap, index = %mu, "gamma contraction");

    match gap {
        0 => {
            factors[this] = dim;
            factors[other] = Expr::Clifford(Clifford::one(label));
        }
        1 => {
            factors[this] = Expr::integer(2) - dim;
            factors[other] = one();
        }
        2 => {
            let (a, b) = (&between[0], &between[1]);
            let metric = match (a.gamma_index(), b.gamma_index()) {
                (Some(ia), Some(ib)) => lorentz(ia, ib),
                _ => return false,
            };
            factors[this] = Expr::product([
                Expr::integer(4),
                metric,
                Expr::Clifford(Clifford::one(label)),
            ]) + Expr::product([
                dim - Expr::integer(4),
                Expr::Clifford(a.clone()),
                Expr::Clifford(b.clone()),
            ]);
            factors[this + 1] = one();
            factors[this + 2] = one();
            factors[other] = one();
        }
        _ => {
            // gamma~mu S gamma~a gamma.mu = 2 gamma~a S - gamma~mu S gamma.mu gamma~a
            let (last, rest) = match between.split_last() {
                Some(split) => split,
                None => return false,
            };
            let me = factors[this].clone();
            let partner = factors[other].clone();
            let last = Expr::Clifford(last.clone());
            let rest: Vec<Expr> = rest.iter().cloned().map(Expr::Clifford).collect();

            let moved = Expr::product(
                [Expr::integer(2), last.clone()]
                    .into_iter()
                    .chain(rest.iter().cloned()),
            );
            let shortened = Expr::product(
                std::iter::once(me)
                    .chain(rest)
                    .chain([partner, last]),
            );
            factors[this] = moved - shortened;
            for slot in &mut factors[this + 1..=other] {
                *slot = one();
            }
        }
    }
    true
}

fn gamma_pair(a: &Expr, b: &Expr) -> Option<(u8, Index, Index)> {
    let (a, b) = (a.as_clifford()?, b.as_clifford()?);
    if a.label != b.label {
        return None;
    }
    Some((a.label, a.gamma_index()?.clone(), b.gamma_index()?.clone()))
}

fn lorentz(a: &Index, b: &Index) -> Expr {
    Tensor::Minkowski { pos_sig: false }.build(vec![a.clone(), b.clone()])
}
