//! Special tensors: Kronecker delta, metrics, spinor metric and the totally antisymmetric
//! epsilon tensor, with their evaluation and contraction rules.

use crate::error::{AlgebraError, Result};
use crate::expr::{Base, Expr, Indexed, one, zero};
use crate::index::{Dim, Index};
use crate::perm::{permutation_sign, signed_permutations};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Tensor {
    Delta,
    /// Generic symmetric metric.
    Metric,
    /// Diagonal metric `diag(+1, -1, ..., -1)`, or its negative when `pos_sig` is set.
    Minkowski { pos_sig: bool },
    /// Antisymmetric metric of two-dimensional spinor space.
    SpinorMetric,
    Epsilon { minkowski: bool, pos_sig: bool },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Symmetry {
    Symmetric,
    Antisymmetric,
}

impl Tensor {
    pub fn symmetry(&self) -> Symmetry {
        match self {
            Tensor::Delta | Tensor::Metric | Tensor::Minkowski { .. } => Symmetry::Symmetric,
            Tensor::SpinorMetric | Tensor::Epsilon { .. } => Symmetry::Antisymmetric,
        }
    }

    /// Name used by the printer and the parser.
    pub fn name(&self) -> &'static str {
        match self {
            Tensor::Delta => "delta",
            Tensor::Metric => "g",
            Tensor::Minkowski { pos_sig: false } => "eta",
            Tensor::Minkowski { pos_sig: true } => "eta_p",
            Tensor::SpinorMetric => "seps",
            Tensor::Epsilon { minkowski: false, .. } => "eps",
            Tensor::Epsilon {
                minkowski: true,
                pos_sig: false,
            } => "leps",
            Tensor::Epsilon {
                minkowski: true,
                pos_sig: true,
            } => "leps_p",
        }
    }

    /// Two-index tensors take exactly two indices, epsilon at least one.
    pub(crate) fn check_arity(&self, count: usize) -> Result<()> {
        let ok = match self {
            Tensor::Epsilon { .. } => count >= 1,
            _ => count == 2,
        };
        if ok {
            Ok(())
        } else {
            Err(AlgebraError::InvalidIndex(format!(
                "{} cannot take {count} indices",
                self.name()
            )))
        }
    }

    /// Put the indices into canonical order (collecting the sign for antisymmetric tensors)
    /// and apply the evaluation rules.
    pub(crate) fn build(self, indices: Vec<Index>) -> Expr {
        let mut indices = indices;
        let sign = match self.symmetry() {
            Symmetry::Symmetric => {
                indices.sort();
                1
            }
            Symmetry::Antisymmetric => permutation_sign(&mut indices),
        };
        if sign == 0 {
            return zero();
        }
        let value = self.evaluate(indices);
        if sign < 0 { value.negate() } else { value }
    }

    fn hold(self, indices: Vec<Index>) -> Expr {
        Expr::Indexed(Indexed {
            base: Base::Tensor(self),
            indices,
        })
    }

    fn evaluate(self, indices: Vec<Index>) -> Expr {
        match self {
            Tensor::Delta => eval_delta(indices),
            Tensor::Metric => eval_metric(self, indices),
            Tensor::Minkowski { pos_sig } => match numeric_pair(&indices) {
                Some((a, b)) if a != b => zero(),
                Some((a, _)) => {
                    let time_like = a == 0;
                    if time_like != pos_sig { one() } else { Expr::integer(-1) }
                }
                None => eval_metric(self, indices),
            },
            Tensor::SpinorMetric => {
                if indices[0].is_dummy_pair(&indices[1]) {
                    return zero();
                }
                match numeric_pair(&indices) {
                    Some((a, b)) if a == b => zero(),
                    Some((a, b)) if a < b => one(),
                    Some(_) => Expr::integer(-1),
                    None => self.hold(indices),
                }
            }
            Tensor::Epsilon { minkowski, pos_sig } => eval_epsilon(indices, minkowski, pos_sig),
        }
    }
}

fn numeric_pair(indices: &[Index]) -> Option<(u32, u32)> {
    Some((indices[0].numeric_value()?, indices[1].numeric_value()?))
}

fn eval_delta(indices: Vec<Index>) -> Expr {
    if indices[0].is_dummy_pair(&indices[1]) {
        return match indices[0].minimal_dim(&indices[1]) {
            Ok(dim) => dim.to_expr(),
            Err(_) => Tensor::Delta.hold(indices),
        };
    }
    match numeric_pair(&indices) {
        Some((a, b)) if a == b => one(),
        Some(_) => zero(),
        None => Tensor::Delta.hold(indices),
    }
}

/// Rules shared by the generic and the Minkowski metric.
fn eval_metric(tensor: Tensor, indices: Vec<Index>) -> Expr {
    if indices[0].dim() != indices[1].dim() {
        return match indices[0].minimal_dim(&indices[1]) {
            Ok(dim) => tensor.build(indices.iter().map(|i| i.replace_dim(dim.clone())).collect()),
            Err(_) => tensor.hold(indices),
        };
    }
    if indices[0].is_covariant() != indices[1].is_covariant() {
        return Tensor::Delta.build(indices);
    }
    tensor.hold(indices)
}

fn eval_epsilon(indices: Vec<Index>, minkowski: bool, pos_sig: bool) -> Expr {
    let has_dummy = indices
        .iter()
        .enumerate()
        .any(|(k, a)| indices[k + 1..].iter().any(|b| a.is_dummy_pair(b)));
    if has_dummy {
        return zero();
    }

    let values: Option<Vec<u32>> = indices.iter().map(Index::numeric_value).collect();
    let Some(mut values) = values else {
        return Tensor::Epsilon { minkowski, pos_sig }.hold(indices);
    };
    let mut sign = permutation_sign(&mut values) as i64;
    if minkowski {
        for index in indices.iter().filter(|i| i.is_covariant()) {
            let time_like = index.numeric_value() == Some(0);
            if time_like == pos_sig {
                sign = -sign;
            }
        }
    }
    Expr::integer(sign)
}

pub fn delta_tensor(i1: Index, i2: Index) -> Expr {
    Tensor::Delta.build(vec![i1, i2])
}

pub fn metric_tensor(i1: Index, i2: Index) -> Result<Expr> {
    require_varying(&[&i1, &i2], "metric tensor")?;
    Ok(Tensor::Metric.build(vec![i1, i2]))
}

pub fn lorentz_g(i1: Index, i2: Index, pos_sig: bool) -> Result<Expr> {
    require_varying(&[&i1, &i2], "Lorentz metric")?;
    Ok(Tensor::Minkowski { pos_sig }.build(vec![i1, i2]))
}

pub fn spinor_metric(i1: Index, i2: Index) -> Result<Expr> {
    if !i1.is_spinor() || !i2.is_spinor() {
        return Err(AlgebraError::InvalidIndex(
            "indices of the spinor metric must be spinor indices".into(),
        ));
    }
    if *i1.dim() != Dim::Concrete(2) || *i2.dim() != Dim::Concrete(2) {
        return Err(AlgebraError::DimensionMismatch(
            "index dimension of the spinor metric must be 2".into(),
        ));
    }
    Ok(Tensor::SpinorMetric.build(vec![i1, i2]))
}

/// Totally antisymmetric tensor whose rank equals the (concrete) dimension of its indices.
pub fn epsilon_tensor(indices: Vec<Index>) -> Result<Expr> {
    let Some(first) = indices.first() else {
        return Err(AlgebraError::InvalidIndex(
            "epsilon tensor needs at least one index".into(),
        ));
    };
    let dim = first.dim().clone();
    if indices.iter().any(|i| *i.dim() != dim) {
        return Err(AlgebraError::DimensionMismatch(
            "all indices of an epsilon tensor must have the same dimension".into(),
        ));
    }
    if dim != Dim::Concrete(indices.len() as u32) {
        return Err(AlgebraError::DimensionMismatch(format!(
            "index dimension {dim} of an epsilon tensor must match its {} indices",
            indices.len()
        )));
    }
    Ok(Tensor::Epsilon {
        minkowski: false,
        pos_sig: false,
    }
    .build(indices))
}

/// Epsilon tensor of four-dimensional Minkowski space.
pub fn lorentz_eps(i1: Index, i2: Index, i3: Index, i4: Index, pos_sig: bool) -> Result<Expr> {
    require_varying(&[&i1, &i2, &i3, &i4], "Lorentz epsilon tensor")?;
    let indices = vec![i1, i2, i3, i4];
    if indices.iter().any(|i| *i.dim() != Dim::Concrete(4)) {
        return Err(AlgebraError::DimensionMismatch(
            "indices of the Lorentz epsilon tensor must have dimension 4".into(),
        ));
    }
    Ok(Tensor::Epsilon {
        minkowski: true,
        pos_sig,
    }
    .build(indices))
}

fn require_varying(indices: &[&Index], what: &str) -> Result<()> {
    match indices.iter().find(|i| !i.is_varying()) {
        Some(bad) => Err(AlgebraError::InvalidIndex(format!(
            "index {bad} of the {what} must be a varying index"
        ))),
        None => Ok(()),
    }
}

/// Contraction rule of the tensor at `this` with the factor at `other`. On success both slots
/// have been rewritten; on failure `factors` is untouched.
pub(crate) fn contract_with(tensor: Tensor, factors: &mut [Expr], this: usize, other: usize) -> bool {
    let partner = tensor_of(&factors[other]);
    match tensor {
        Tensor::Delta => replace_contr_index(factors, this, other, false),
        Tensor::Metric | Tensor::Minkowski { .. } => {
            partner != Some(Tensor::Delta) && replace_contr_index(factors, this, other, false)
        }
        Tensor::SpinorMetric => {
            if partner == Some(Tensor::SpinorMetric) && contract_spinor_pair(factors, this, other) {
                return true;
            }
            partner != Some(Tensor::Delta) && replace_contr_index(factors, this, other, true)
        }
        Tensor::Epsilon { minkowski, pos_sig } => {
            matches!(partner, Some(Tensor::Epsilon { .. }))
                && contract_epsilon_pair(factors, this, other, minkowski, pos_sig)
        }
    }
}

fn tensor_of(expr: &Expr) -> Option<Tensor> {
    match expr {
        Expr::Indexed(Indexed {
            base: Base::Tensor(t),
            ..
        }) => Some(*t),
        _ => None,
    }
}

fn two_indices(expr: &Expr) -> Option<(Index, Index)> {
    match expr {
        Expr::Indexed(ix) if ix.indices.len() == 2 => {
            Some((ix.indices[0].clone(), ix.indices[1].clone()))
        }
        _ => None,
    }
}

/// Remove a two-index tensor by renaming the partner's matching index to the tensor's other
/// index. Slot one is tried before slot two. For the spinor metric the result carries a sign
/// that depends on the slot and on the variance of the contracted index.
fn replace_contr_index(factors: &mut [Expr], this: usize, other: usize, spinor: bool) -> bool {
    let Some((first, second)) = two_indices(&factors[this]) else {
        return false;
    };
    let strategies = [(&first, &second, 1i64), (&second, &first, -1i64)];
    for (self_idx, free_idx, slot_sign) in strategies {
        if !self_idx.is_symbolic() {
            continue;
        }
        let matched = factors[other]
            .indices()
            .into_iter()
            .find(|o| self_idx.is_dummy_pair(o))
            .cloned();
        let Some(other_idx) = matched else {
            continue;
        };
        let Ok(dim) = self_idx.minimal_dim(&other_idx) else {
            return false;
        };
        factors[other] = factors[other].subs_index(&other_idx, &free_idx.replace_dim(dim));
        factors[this] = if spinor {
            let sign = if self_idx.is_covariant() { slot_sign } else { -slot_sign };
            Expr::integer(sign)
        } else {
            one()
        };
        tracing::trace!(target: "contract", index = %self_idx, "index renamed");
        return true;
    }
    false
}

fn contract_spinor_pair(factors: &mut [Expr], this: usize, other: usize) -> bool {
    let (Some((s1, s2)), Some((o1, o2))) = (two_indices(&factors[this]), two_indices(&factors[other]))
    else {
        return false;
    };
    let result = if s1.is_dummy_pair(&o1) {
        if s2.is_dummy_pair(&o2) {
            Expr::integer(2)
        } else {
            delta_tensor(s2, o2)
        }
    } else if s1.is_dummy_pair(&o2) {
        if s2.is_dummy_pair(&o1) {
            Expr::integer(-2)
        } else {
            delta_tensor(s2, o1).negate()
        }
    } else if s2.is_dummy_pair(&o1) {
        delta_tensor(s1, o2).negate()
    } else if s2.is_dummy_pair(&o2) {
        delta_tensor(s1, o1)
    } else {
        return false;
    };
    factors[this] = result;
    factors[other] = one();
    true
}

/// Two epsilon tensors of equal valence contract to the determinant of the matrix of pairwise
/// metric contractions between their slots.
fn contract_epsilon_pair(
    factors: &mut [Expr],
    this: usize,
    other: usize,
    minkowski: bool,
    pos_sig: bool,
) -> bool {
    let (Expr::Indexed(mine), Expr::Indexed(theirs)) = (&factors[this], &factors[other]) else {
        return false;
    };
    let n = mine.indices.len();
    if theirs.indices.len() != n {
        return false;
    }

    let varying = mine.indices[0].is_varying();
    let entry = |a: &Index, b: &Index| -> Expr {
        let pair = vec![a.clone(), b.clone()];
        if minkowski {
            Tensor::Minkowski { pos_sig }.build(pair)
        } else if varying {
            Tensor::Metric.build(pair)
        } else {
            Tensor::Delta.build(pair)
        }
    };
    let matrix: Vec<Vec<Expr>> = mine
        .indices
        .iter()
        .map(|a| theirs.indices.iter().map(|b| entry(a, b)).collect())
        .collect();

    let determinant = Expr::sum(signed_permutations(n).into_iter().map(|(perm, sign)| {
        let term = Expr::product(perm.iter().enumerate().map(|(row, &col)| matrix[row][col].clone()));
        if sign < 0 { term.negate() } else { term }
    }));

    tracing::debug!(target: "contract", rank = n, minkowski, "epsilon pair contracted");
    factors[this] = if minkowski {
        determinant.negate()
    } else {
        determinant
    };
    factors[other] = one();
    true
}
