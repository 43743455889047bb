//! Traces of Clifford expressions.

use crate::clifford::Clifford;
use crate::error::{AlgebraError, Result};
use crate::expr::{Expr, zero};
use crate::index::Index;
use crate::limits::Limits;
use crate::perm::permutation_sign;
use crate::simplify::expand;
use crate::tensor::Tensor;
use num_integer::Integer;

/// Trace over the representation `label`, with `tr_one` the trace of the unit matrix
/// (usually `4`). Clifford factors of other labels are carried along as scalars.
pub fn dirac_trace(expr: &Expr, label: u8, tr_one: &Expr) -> Result<Expr> {
    dirac_trace_with_limits(expr, label, tr_one, &Limits::default())
}

pub fn dirac_trace_with_limits(
    expr: &Expr,
    label: u8,
    tr_one: &Expr,
    limits: &Limits,
) -> Result<Expr> {
    let tracer = Tracer {
        label,
        tr_one,
        limits,
    };
    tracer.trace(expr, 0)
}

struct Tracer<'a> {
    label: u8,
    tr_one: &'a Expr,
    limits: &'a Limits,
}

impl Tracer<'_> {
    fn trace(&self, expr: &Expr, depth: usize) -> Result<Expr> {
        self.limits.check_depth(depth)?;
        match expr {
            Expr::Clifford(c) if c.label == self.label && c.is_one() => Ok(self.tr_one.clone()),
            Expr::Add(terms) => {
                let traced = terms
                    .iter()
                    .map(|t| self.trace(t, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Expr::sum(traced))
            }
            Expr::Mul(factors) => {
                let (inner, outer): (Vec<Expr>, Vec<Expr>) = factors
                    .iter()
                    .cloned()
                    .partition(|f| f.nc_label() == Some(self.label));
                if inner.is_empty() {
                    return Ok(Expr::product(outer));
                }
                let traced = self.trace(&Expr::product(inner), depth + 1)?;
                Ok(Expr::product(outer.into_iter().chain([traced])))
            }
            Expr::NcMul(l, _) if *l != self.label => Ok(zero()),
            Expr::NcMul(_, _) => match expand(expr) {
                Expr::NcMul(_, items) => {
                    let word = items
                        .iter()
                        .map(Expr::as_clifford)
                        .collect::<Option<Vec<&Clifford>>>()
                        .ok_or_else(|| {
                            AlgebraError::Unsupported(format!("trace of non-Clifford word {expr}"))
                        })?;
                    self.trace_word(&word, depth)
                }
                other => self.trace(&other, depth + 1),
            },
            _ => Ok(zero()),
        }
    }

    /// Trace of a normalized word: `Gamma5` only in front, no `One`.
    fn trace_word(&self, word: &[&Clifford], depth: usize) -> Result<Expr> {
        let has_gamma5 = word.first().is_some_and(|c| c.is_gamma5());
        let gammas = if has_gamma5 { &word[1..] } else { word };
        let indices = gammas
            .iter()
            .map(|c| c.gamma_index().cloned())
            .collect::<Option<Vec<Index>>>()
            .ok_or_else(|| AlgebraError::Unsupported("trace of an unnormalized word".into()))?;
        let num = indices.len();
        tracing::trace!(target: "trace", num, has_gamma5, "tracing word");

        if has_gamma5 {
            if num.is_odd() || num < 4 {
                return Ok(zero());
            }
            let prefactor = self.tr_one.clone() * Expr::i();
            if num == 4 {
                return Ok(prefactor * eps0123(&indices));
            }
            let mut terms = Vec::new();
            for i in 0..num - 3 {
                for j in i + 1..num - 2 {
                    for k in j + 1..num - 1 {
                        for l in k + 1..num {
                            let mut order = vec![i, j, k, l];
                            let rest: Vec<Index> = (0..num)
                                .filter(|n| ![i, j, k, l].contains(n))
                                .inspect(|&n| order.push(n))
                                .map(|n| indices[n].clone())
                                .collect();
                            let sign = permutation_sign(&mut order);
                            let eps = eps0123(&[
                                indices[i].clone(),
                                indices[j].clone(),
                                indices[k].clone(),
                                indices[l].clone(),
                            ]);
                            let term = Expr::product([
                                Expr::integer(sign),
                                eps,
                                self.trace_string(&rest, depth + 1)?,
                            ]);
                            terms.push(term);
                        }
                    }
                }
            }
            return Ok(prefactor * Expr::sum(terms));
        }

        if num.is_odd() {
            return Ok(zero());
        }
        Ok(self.tr_one.clone() * self.trace_string(&indices, depth + 1)?)
    }

    /// Trace of a string of an even number of gammas, without the `tr_one` factor.
    fn trace_string(&self, ix: &[Index], depth: usize) -> Result<Expr> {
        self.limits.check_depth(depth)?;
        if ix.len() == 2 {
            return Ok(lorentz(&ix[0], &ix[1]));
        }
        let mut terms = Vec::with_capacity(ix.len() - 1);
        let mut sign = 1;
        for i in 1..ix.len() {
            let rest: Vec<Index> = ix[1..]
                .iter()
                .enumerate()
                .filter(|(n, _)| n + 1 != i)
                .map(|(_, x)| x.clone())
                .collect();
            terms.push(Expr::product([
                Expr::integer(sign),
                lorentz(&ix[0], &ix[i]),
                self.trace_string(&rest, depth + 1)?,
            ]));
            sign = -sign;
        }
        Ok(Expr::sum(terms))
    }
}

fn lorentz(a: &Index, b: &Index) -> Expr {
    Tensor::Minkowski { pos_sig: false }.build(vec![a.clone(), b.clone()])
}

/// Four-dimensional Minkowski epsilon over the given indices, whatever their dimension.
fn eps0123(ix: &[Index]) -> Expr {
    Tensor::Epsilon {
        minkowski: true,
        pos_sig: false,
    }
    .build(ix.to_vec())
}
