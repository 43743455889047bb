use crate::expr::{Expr, one};

/// Multiply out every product over the sums it contains, including sums held inside Clifford
/// words. The result is a sum of monomials in canonical form, so two expanded expressions
/// compare equal exactly when they agree as polynomials.
pub fn expand(expr: &Expr) -> Expr {
    match expr {
        Expr::Add(terms) => Expr::sum(terms.iter().map(expand)),
        Expr::Mul(factors) | Expr::NcMul(_, factors) => distribute(factors),
        other => other.clone(),
    }
}

fn distribute(factors: &[Expr]) -> Expr {
    let mut acc = vec![one()];
    for factor in factors {
        let parts = match expand(factor) {
            Expr::Add(terms) => terms,
            other => vec![other],
        };
        let mut next = Vec::with_capacity(acc.len() * parts.len());
        for left in &acc {
            for right in &parts {
                let term = Expr::product([left.clone(), right.clone()]);
                if !term.is_zero() {
                    next.push(term);
                }
            }
        }
        acc = next;
        if acc.is_empty() {
            break;
        }
    }
    Expr::sum(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distributes_over_sums() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let square = (a.clone() + b.clone()) * (a.clone() + b.clone());
        let expected = a.clone() * a.clone() + Expr::integer(2) * a.clone() * b.clone() + b.clone() * b;
        assert_eq!(expand(&square), expected);
    }

    #[test]
    fn expanded_difference_of_equal_polynomials_vanishes() {
        let d = Expr::symbol("D");
        let lhs = Expr::integer(4) * (Expr::integer(2) - d.clone());
        let rhs = Expr::integer(8) - Expr::integer(4) * d;
        assert!(expand(&(lhs - rhs)).is_zero());
    }
}
