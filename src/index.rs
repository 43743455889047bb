//! Index objects: value, variance and dimension.

use std::fmt;

use crate::error::{AlgebraError, Result};
use crate::expr::Expr;

/// Either a symbolic name or a concrete component number.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum IndexValue {
    Number(u32),
    Symbol(String),
}

impl From<u32> for IndexValue {
    fn from(value: u32) -> Self {
        IndexValue::Number(value)
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Symbol(value.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Symbol(value)
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Number(n) => write!(f, "{n}"),
            IndexValue::Symbol(s) => write!(f, "{s}"),
        }
    }
}

/// Range of an index.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Dim {
    Concrete(u32),
    Symbolic(String),
}

impl Dim {
    pub fn symbolic(name: impl Into<String>) -> Self {
        Dim::Symbolic(name.into())
    }

    /// The smaller of two dimensions. A concrete dimension is taken to be smaller than any
    /// symbolic one; two distinct symbolic dimensions cannot be ordered.
    pub fn minimal(&self, other: &Dim) -> Result<Dim> {
        match (self, other) {
            (a, b) if a == b => Ok(a.clone()),
            (Dim::Concrete(a), Dim::Concrete(b)) => Ok(Dim::Concrete(*a.min(b))),
            (Dim::Concrete(_), Dim::Symbolic(_)) => Ok(self.clone()),
            (Dim::Symbolic(_), Dim::Concrete(_)) => Ok(other.clone()),
            _ => Err(AlgebraError::IncomparableDimensions(
                self.clone(),
                other.clone(),
            )),
        }
    }

    pub fn to_expr(&self) -> Expr {
        match self {
            Dim::Concrete(n) => Expr::integer(*n),
            Dim::Symbolic(s) => Expr::symbol(s.clone()),
        }
    }
}

impl From<u32> for Dim {
    fn from(value: u32) -> Self {
        Dim::Concrete(value)
    }
}

impl From<&str> for Dim {
    fn from(value: &str) -> Self {
        Dim::Symbolic(value.to_string())
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Concrete(n) => write!(f, "{n}"),
            Dim::Symbolic(s) => write!(f, "{s}"),
        }
    }
}

/// Plain indices carry no variance; varying indices distinguish upper and lower position;
/// spinor indices additionally carry a dotted flag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum IndexKind {
    Plain,
    Varying { covariant: bool },
    Spinor { covariant: bool, dotted: bool },
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Index {
    value: IndexValue,
    kind: IndexKind,
    dim: Dim,
}

impl Index {
    pub fn new(value: impl Into<IndexValue>, kind: IndexKind, dim: impl Into<Dim>) -> Self {
        Index {
            value: value.into(),
            kind,
            dim: dim.into(),
        }
    }

    pub fn plain(value: impl Into<IndexValue>, dim: impl Into<Dim>) -> Self {
        Index::new(value, IndexKind::Plain, dim)
    }

    /// Contravariant (upper) varying index.
    pub fn varying(value: impl Into<IndexValue>, dim: impl Into<Dim>) -> Self {
        Index::new(value, IndexKind::Varying { covariant: false }, dim)
    }

    /// Contravariant, undotted spinor index.
    pub fn spinor(value: impl Into<IndexValue>, dim: impl Into<Dim>) -> Self {
        Index::new(
            value,
            IndexKind::Spinor {
                covariant: false,
                dotted: false,
            },
            dim,
        )
    }

    pub fn value(&self) -> &IndexValue {
        &self.value
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn dim(&self) -> &Dim {
        &self.dim
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self.value, IndexValue::Symbol(_))
    }

    pub fn numeric_value(&self) -> Option<u32> {
        match self.value {
            IndexValue::Number(n) => Some(n),
            IndexValue::Symbol(_) => None,
        }
    }

    pub fn is_varying(&self) -> bool {
        matches!(self.kind, IndexKind::Varying { .. })
    }

    pub fn is_spinor(&self) -> bool {
        matches!(self.kind, IndexKind::Spinor { .. })
    }

    /// Lower position. Plain indices are never covariant.
    pub fn is_covariant(&self) -> bool {
        match self.kind {
            IndexKind::Plain => false,
            IndexKind::Varying { covariant } | IndexKind::Spinor { covariant, .. } => covariant,
        }
    }

    pub fn toggle_variance(&self) -> Index {
        let kind = match self.kind {
            IndexKind::Plain => IndexKind::Plain,
            IndexKind::Varying { covariant } => IndexKind::Varying {
                covariant: !covariant,
            },
            IndexKind::Spinor { covariant, dotted } => IndexKind::Spinor {
                covariant: !covariant,
                dotted,
            },
        };
        Index {
            value: self.value.clone(),
            kind,
            dim: self.dim.clone(),
        }
    }

    pub fn replace_dim(&self, dim: Dim) -> Index {
        Index {
            value: self.value.clone(),
            kind: self.kind,
            dim,
        }
    }

    pub fn minimal_dim(&self, other: &Index) -> Result<Dim> {
        self.dim.minimal(&other.dim)
    }

    /// Two indices are contracted against each other: same kind, same symbolic value,
    /// opposite variance (for kinds that have one) and comparable dimensions.
    pub fn is_dummy_pair(&self, other: &Index) -> bool {
        if !self.is_symbolic() || self.value != other.value {
            return false;
        }
        let kinds_pair = match (self.kind, other.kind) {
            (IndexKind::Plain, IndexKind::Plain) => true,
            (IndexKind::Varying { covariant: a }, IndexKind::Varying { covariant: b }) => a != b,
            (
                IndexKind::Spinor {
                    covariant: a,
                    dotted: da,
                },
                IndexKind::Spinor {
                    covariant: b,
                    dotted: db,
                },
            ) => a != b && da == db,
            _ => false,
        };
        kinds_pair && self.minimal_dim(other).is_ok()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            IndexKind::Plain => "",
            IndexKind::Varying { covariant: true } | IndexKind::Spinor { covariant: true, .. } => {
                "."
            }
            _ => "~",
        };
        write!(f, "{marker}{}", self.value)?;
        if let IndexKind::Spinor { dotted: true, .. } = self.kind {
            write!(f, "'")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_pairs_need_opposite_variance() {
        let mu = Index::varying("mu", "D");
        assert!(mu.is_dummy_pair(&mu.toggle_variance()));
        assert!(!mu.is_dummy_pair(&mu));
        assert!(!mu.is_dummy_pair(&Index::varying("nu", "D").toggle_variance()));
    }

    #[test]
    fn numeric_indices_never_pair() {
        let zero = Index::varying(0, 4);
        assert!(!zero.is_dummy_pair(&zero.toggle_variance()));
    }

    #[test]
    fn plain_indices_pair_with_themselves() {
        let i = Index::plain("i", 3);
        assert!(i.is_dummy_pair(&i));
    }

    #[test]
    fn minimal_dim_rules() {
        let d = Dim::symbolic("D");
        assert_eq!(d.minimal(&Dim::Concrete(4)).unwrap(), Dim::Concrete(4));
        assert_eq!(Dim::Concrete(3).minimal(&Dim::Concrete(4)).unwrap(), Dim::Concrete(3));
        assert!(d.minimal(&Dim::symbolic("E")).is_err());
        let mu = Index::varying("mu", "D");
        let other = Index::varying("mu", "E").toggle_variance();
        assert!(!mu.is_dummy_pair(&other));
    }

    #[test]
    fn toggle_keeps_value_and_dim() {
        let a = Index::spinor("A", 2);
        let b = a.toggle_variance();
        assert_eq!(b.value(), a.value());
        assert_eq!(b.dim(), a.dim());
        assert!(b.is_covariant());
        assert_eq!(b.toggle_variance(), a);
    }
}
