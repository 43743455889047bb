use crate::clifford::{Clifford, Dirac};
use crate::expr::{Base, Expr, Indexed};

/// Render an expression in the notation accepted by [`crate::parse_expr`].
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Number(n) => {
                let body = n.to_string();
                if n.is_negative() && ctx > 1 {
                    format!("({body})")
                } else {
                    body
                }
            }
            Expr::Symbol(s) => s.clone(),
            Expr::Indexed(ix) => show_indexed(ix),
            Expr::Clifford(c) => show_clifford(c),

            Expr::Add(terms) => {
                let mut body = String::new();
                for (k, term) in terms.iter().enumerate() {
                    let (neg, inner) = split_neg(term);
                    let s = pp(2, &inner);
                    match (k, neg) {
                        (0, false) => body.push_str(&s),
                        (0, true) => body.push_str(&format!("-{s}")),
                        (_, false) => body.push_str(&format!(" + {s}")),
                        (_, true) => body.push_str(&format!(" - {s}")),
                    }
                }
                bracket(ctx, 1, body)
            }

            Expr::Mul(factors) => {
                let (neg, inner) = split_neg(expr);
                if neg {
                    return bracket(ctx, 2, format!("-{}", pp(2, &inner)));
                }
                let body: Vec<String> = factors.iter().map(|f| pp(3, f)).collect();
                bracket(ctx, 2, body.join("*"))
            }

            Expr::NcMul(_, items) => {
                let body: Vec<String> = items.iter().map(|f| pp(3, f)).collect();
                bracket(ctx, 2, body.join("*"))
            }
        }
    }

    pp(0, expr)
}

fn show_indexed(ix: &Indexed) -> String {
    let name = match &ix.base {
        Base::Symbol(s) => s.as_str(),
        Base::Tensor(t) => t.name(),
    };
    let indices: Vec<String> = ix.indices.iter().map(|i| i.to_string()).collect();
    format!("{name}({})", indices.join(","))
}

fn show_clifford(c: &Clifford) -> String {
    let label = if c.label == 0 {
        String::new()
    } else {
        format!("[{}]", c.label)
    };
    match &c.kind {
        Dirac::One => format!("one{label}"),
        Dirac::Gamma5 => format!("gamma5{label}"),
        Dirac::Gamma(index) => format!("gamma{label}({index})"),
    }
}

/// Pull a negative real leading coefficient out of a term.
fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Number(n) if n.is_negative() => (true, Expr::Number(-n.clone())),
        Expr::Mul(factors) => match factors.first() {
            Some(Expr::Number(n)) if n.is_negative() => {
                let positive = -n.clone();
                let mut rest: Vec<Expr> = factors[1..].to_vec();
                if !positive.is_one() {
                    rest.insert(0, Expr::Number(positive));
                }
                let inner = if rest.len() == 1 {
                    rest.remove(0)
                } else {
                    Expr::Mul(rest)
                };
                (true, inner)
            }
            _ => (false, expr.clone()),
        },
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}
