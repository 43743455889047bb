//! Expression tree definitions and canonicalizing constructors.
//!
//! Every `Expr` built through [`Expr::sum`] and [`Expr::product`] is kept in a canonical shape:
//! sums are flat with like terms collected, products carry at most one leading numeric
//! coefficient followed by sorted commutative factors and then one Clifford word per
//! representation label. Same-label Clifford factors are normalized as they are multiplied.

use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use num_bigint::BigInt;

use crate::clifford::normalize::normalize_word;
use crate::clifford::{Clifford, Dirac};
use crate::error::Result;
use crate::index::Index;
use crate::number::Number;
use crate::tensor::Tensor;

/// What carries the indices of an [`Indexed`] object.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Base {
    /// A vector or other user-named object without evaluation rules.
    Symbol(String),
    Tensor(Tensor),
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Indexed {
    pub base: Base,
    pub indices: Vec<Index>,
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Number(Number),
    Symbol(String),
    Indexed(Indexed),
    Clifford(Clifford),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    /// Non-commutative word of one representation label.
    NcMul(u8, Vec<Expr>),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Number(Number::integer(value))
    }

    pub fn fraction(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Number(Number::fraction(num, den))
    }

    pub fn number(value: Number) -> Self {
        Expr::Number(value)
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Expr::Number(Number::i())
    }

    /// An indexed object; tensors are evaluated and their indices put in canonical order.
    pub fn indexed(base: Base, indices: Vec<Index>) -> Result<Self> {
        match base {
            Base::Tensor(tensor) => {
                tensor.check_arity(indices.len())?;
                Ok(tensor.build(indices))
            }
            Base::Symbol(_) => Ok(Expr::Indexed(Indexed { base, indices })),
        }
    }

    /// A vector `name` carrying a single index.
    pub fn vector(name: impl Into<String>, index: Index) -> Self {
        Expr::Indexed(Indexed {
            base: Base::Symbol(name.into()),
            indices: vec![index],
        })
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Number(n) if n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Number(n) if n.is_one())
    }

    pub fn as_number(&self) -> Option<&Number> {
        if let Expr::Number(n) = self {
            Some(n)
        } else {
            None
        }
    }

    pub fn as_clifford(&self) -> Option<&Clifford> {
        if let Expr::Clifford(c) = self {
            Some(c)
        } else {
            None
        }
    }

    /// Representation label of the non-commutative part, if there is one.
    pub fn nc_label(&self) -> Option<u8> {
        match self {
            Expr::Clifford(c) => Some(c.label),
            Expr::NcMul(label, _) => Some(*label),
            Expr::Add(items) | Expr::Mul(items) => items.iter().find_map(Expr::nc_label),
            _ => None,
        }
    }

    /// Indices carried directly by an atom (indexed object or gamma matrix).
    pub fn indices(&self) -> Vec<&Index> {
        match self {
            Expr::Indexed(ix) => ix.indices.iter().collect(),
            Expr::Clifford(Clifford {
                kind: Dirac::Gamma(index),
                ..
            }) => vec![index],
            _ => Vec::new(),
        }
    }

    /// True when some index of `self` forms a dummy pair with some index of `other`.
    pub fn shares_dummy_with(&self, other: &Expr) -> bool {
        let mine = self.indices();
        let theirs = other.indices();
        mine.iter()
            .any(|a| theirs.iter().any(|b| a.is_dummy_pair(b)))
    }

    /// Indices left uncontracted. A sum reports the free indices of its first term.
    pub fn free_indices(&self) -> Vec<Index> {
        let mut all = Vec::new();
        collect_indices(self, &mut all);
        all.iter()
            .enumerate()
            .filter(|(k, idx)| {
                !all.iter()
                    .enumerate()
                    .any(|(m, other)| m != *k && idx.is_dummy_pair(other))
            })
            .map(|(_, idx)| idx.clone())
            .collect()
    }

    pub fn subs_index(&self, from: &Index, to: &Index) -> Expr {
        crate::simplify::substitute_index(self, from, to)
    }

    /// Flattened sum with like terms collected.
    pub fn sum<I>(terms: I) -> Expr
    where
        I: IntoIterator<Item = Expr>,
    {
        let mut collected: BTreeMap<Expr, Number> = BTreeMap::new();
        for term in terms {
            collect_term(term, &mut collected);
        }
        let mut out: Vec<Expr> = collected
            .into_iter()
            .filter(|(_, coeff)| !coeff.is_zero())
            .map(|(rest, coeff)| attach_coeff(coeff, rest))
            .collect();
        match out.len() {
            0 => zero(),
            1 => out.remove(0),
            _ => Expr::Add(out),
        }
    }

    /// Flattened product. Commutative factors are sorted, non-commutative factors keep their
    /// relative order within each representation label.
    pub fn product<I>(factors: I) -> Expr
    where
        I: IntoIterator<Item = Expr>,
    {
        let factors: Vec<Expr> = factors.into_iter().collect();
        // A sum spanning several labels cannot be filed under one word without losing the
        // order of the factors around it.
        if factors.iter().any(mixes_labels) {
            return crate::simplify::expand(&Expr::Mul(factors));
        }

        let mut coeff = Number::one();
        let mut comm = Vec::new();
        let mut words: BTreeMap<u8, Vec<Expr>> = BTreeMap::new();
        for factor in factors {
            absorb_factor(factor, &mut coeff, &mut comm, &mut words);
        }

        let mut word_exprs = Vec::with_capacity(words.len());
        for (label, items) in words {
            if let Some(word) = build_word(label, items, &mut coeff, &mut comm) {
                word_exprs.push(word);
            }
        }
        if coeff.is_zero() {
            return zero();
        }

        comm.sort();
        let mut out = Vec::with_capacity(comm.len() + word_exprs.len() + 1);
        if !coeff.is_one() {
            out.push(Expr::Number(coeff));
        }
        out.extend(comm);
        out.extend(word_exprs);
        match out.len() {
            0 => one(),
            1 => out.remove(0),
            _ => Expr::Mul(out),
        }
    }

    pub fn negate(self) -> Expr {
        Expr::product([Expr::integer(-1), self])
    }

    /// Operands of a sum, or the expression itself as a single term.
    pub fn terms(&self) -> Vec<Expr> {
        match self {
            Expr::Add(terms) => terms.clone(),
            other => vec![other.clone()],
        }
    }
}

fn mixes_labels(expr: &Expr) -> bool {
    fn labels(expr: &Expr, out: &mut Vec<u8>) {
        match expr {
            Expr::Clifford(c) => out.push(c.label),
            Expr::NcMul(label, _) => out.push(*label),
            Expr::Add(items) | Expr::Mul(items) => items.iter().for_each(|i| labels(i, out)),
            _ => {}
        }
    }
    if !matches!(expr, Expr::Add(_)) {
        return false;
    }
    let mut found = Vec::new();
    labels(expr, &mut found);
    found.windows(2).any(|w| w[0] != w[1])
}

fn collect_indices(expr: &Expr, out: &mut Vec<Index>) {
    match expr {
        Expr::Add(terms) => {
            if let Some(first) = terms.first() {
                collect_indices(first, out);
            }
        }
        Expr::Mul(factors) | Expr::NcMul(_, factors) => {
            for f in factors {
                collect_indices(f, out);
            }
        }
        atom => out.extend(atom.indices().into_iter().cloned()),
    }
}

fn collect_term(term: Expr, collected: &mut BTreeMap<Expr, Number>) {
    if let Expr::Add(inner) = term {
        for t in inner {
            collect_term(t, collected);
        }
        return;
    }
    let (coeff, rest) = split_coeff(term);
    if coeff.is_zero() {
        return;
    }
    let slot = collected.entry(rest).or_insert_with(Number::zero);
    *slot = &*slot + &coeff;
}

fn split_coeff(term: Expr) -> (Number, Expr) {
    match term {
        Expr::Number(n) => (n, one()),
        Expr::Mul(mut factors) => {
            let leading = match factors.first() {
                Some(Expr::Number(c)) => Some(c.clone()),
                _ => None,
            };
            match leading {
                Some(c) => {
                    factors.remove(0);
                    let rest = if factors.len() == 1 {
                        factors.remove(0)
                    } else {
                        Expr::Mul(factors)
                    };
                    (c, rest)
                }
                None => (Number::one(), Expr::Mul(factors)),
            }
        }
        other => (Number::one(), other),
    }
}

fn attach_coeff(coeff: Number, rest: Expr) -> Expr {
    if rest.is_one() {
        return Expr::Number(coeff);
    }
    if coeff.is_one() {
        return rest;
    }
    match rest {
        Expr::Mul(mut factors) => {
            factors.insert(0, Expr::Number(coeff));
            Expr::Mul(factors)
        }
        other => Expr::Mul(vec![Expr::Number(coeff), other]),
    }
}

fn absorb_factor(
    factor: Expr,
    coeff: &mut Number,
    comm: &mut Vec<Expr>,
    words: &mut BTreeMap<u8, Vec<Expr>>,
) {
    match factor {
        Expr::Number(n) => *coeff = &*coeff * &n,
        Expr::Mul(inner) => {
            for f in inner {
                absorb_factor(f, coeff, comm, words);
            }
        }
        Expr::NcMul(label, items) => words.entry(label).or_default().extend(items),
        Expr::Clifford(c) => words.entry(c.label).or_default().push(Expr::Clifford(c)),
        other => match other.nc_label() {
            Some(label) => words.entry(label).or_default().push(other),
            None => comm.push(other),
        },
    }
}

/// Turns the same-label factors of a product into a word. Plain Clifford words go through the
/// normalizer; words holding unexpanded sums are kept as they are.
fn build_word(
    label: u8,
    items: Vec<Expr>,
    coeff: &mut Number,
    comm: &mut Vec<Expr>,
) -> Option<Expr> {
    if !items.iter().all(|item| matches!(item, Expr::Clifford(_))) {
        let mut items = items;
        return Some(if items.len() == 1 {
            items.remove(0)
        } else {
            Expr::NcMul(label, items)
        });
    }

    let factors = items
        .into_iter()
        .filter_map(|item| match item {
            Expr::Clifford(c) => Some(c),
            _ => None,
        })
        .collect();
    let normal = normalize_word(label, factors);
    if normal.negative {
        *coeff = -coeff.clone();
    }
    for scalar in normal.scalars {
        match scalar {
            Expr::Number(n) => *coeff = &*coeff * &n,
            other => comm.push(other),
        }
    }
    let mut word: Vec<Expr> = normal.word.into_iter().map(Expr::Clifford).collect();
    match word.len() {
        0 => None,
        1 => Some(word.remove(0)),
        _ => Some(Expr::NcMul(label, word)),
    }
}

pub fn zero() -> Expr {
    Expr::Number(Number::zero())
}

pub fn one() -> Expr {
    Expr::Number(Number::one())
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<Number> for Expr {
    fn from(value: Number) -> Self {
        Expr::Number(value)
    }
}

impl ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum([self, rhs])
    }
}

impl ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum([self, rhs.negate()])
    }
}

impl ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product([self, rhs])
    }
}

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.negate()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}
