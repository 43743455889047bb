//! Reader for the compact text notation used by the printer.
//!
//! `gamma(~mu)`, `gamma[1](.nu)`, `gamma5`, `one`, `slash(q)`, `eta(~mu,~nu)`, `g(...)`,
//! `delta(i,j)`, `eps(i,j,k)`, `leps(~a,~b,~c,~d)`, `seps(A,B)` and vectors such as `q(.mu)`.
//! A `~` marks an upper index, a `.` a lower one and a bare index is plain. Numbers are exact,
//! `I` is the imaginary unit; `+ - * /` and `^` with a non-negative integer exponent are
//! supported. Division is only by non-zero numbers.

use std::str::FromStr;

use crate::clifford::{
    dirac_gamma, dirac_gamma5, dirac_gamma6, dirac_gamma7, dirac_one, dirac_slash,
};
use crate::error::{AlgebraError, Result};
use crate::expr::{Base, Expr, one};
use crate::index::{Dim, Index, IndexKind, IndexValue};
use crate::tensor::{delta_tensor, epsilon_tensor, lorentz_eps, lorentz_g, metric_tensor, spinor_metric};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, opt, recognize};
use nom::error::VerboseError;
use nom::multi::{fold_many0, many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, tuple};
use num_bigint::BigInt;

/// Powers are expanded into repeated products, so the exponent is capped.
const MAX_EXPONENT: u32 = 64;

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn parse_expr(input: &str) -> Result<Expr> {
    parse_expr_with_dim(input, &Dim::symbolic("D"))
}

/// Parse with `dim` as the dimension of varying and plain indices.
pub fn parse_expr_with_dim(input: &str, dim: &Dim) -> Result<Expr> {
    let node = match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, node)) => node,
        Err(e) => return Err(AlgebraError::Parse(format!("{e:?}"))),
    };
    Builder { dim }.build(&node)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Bare,
    Upper,
    Lower,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct IndexSpec {
    marker: Marker,
    value: IndexValue,
    dotted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Node {
    Integer(BigInt),
    Atom {
        name: String,
        label: Option<u8>,
        args: Option<Vec<IndexSpec>>,
    },
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Pow(Box<Node>, u32),
    Neg(Box<Node>),
}

fn parse_add_sub(input: &str) -> PResult<'_, Node> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Node::Add(Box::new(acc), Box::new(rhs)),
            _ => Node::Sub(Box::new(acc), Box::new(rhs)),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> PResult<'_, Node> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Node::Mul(Box::new(acc), Box::new(rhs)),
            _ => Node::Div(Box::new(acc), Box::new(rhs)),
        },
    )(rest)
}

fn parse_unary(input: &str) -> PResult<'_, Node> {
    if let Ok((rest, node)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Node::Neg(Box::new(node))))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> PResult<'_, Node> {
    let (rest, base) = parse_primary(input)?;
    let (rest, exp) = opt(preceded(ws(char('^')), ws(map_res(digit1, u32::from_str))))(rest)?;
    Ok(match exp {
        Some(exp) => (rest, Node::Pow(Box::new(base), exp)),
        None => (rest, base),
    })
}

fn parse_primary(input: &str) -> PResult<'_, Node> {
    alt((parse_parens, parse_integer, parse_atom))(input)
}

fn parse_parens(input: &str) -> PResult<'_, Node> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_integer(input: &str) -> PResult<'_, Node> {
    map(ws(map_res(digit1, BigInt::from_str)), Node::Integer)(input)
}

fn parse_atom(input: &str) -> PResult<'_, Node> {
    map(
        ws(tuple((
            identifier,
            opt(delimited(char('['), map_res(digit1, u8::from_str), char(']'))),
            opt(delimited(
                ws(char('(')),
                separated_list0(ws(char(',')), ws(parse_index)),
                ws(char(')')),
            )),
        ))),
        |(name, label, args)| Node::Atom {
            name: name.to_string(),
            label,
            args,
        },
    )(input)
}

fn parse_index(input: &str) -> PResult<'_, IndexSpec> {
    map(
        tuple((
            opt(alt((char('~'), char('.')))),
            alt((
                map(map_res(digit1, u32::from_str), IndexValue::Number),
                map(identifier, |s: &str| IndexValue::Symbol(s.to_string())),
            )),
            opt(char('\'')),
        )),
        |(marker, value, dotted)| IndexSpec {
            marker: match marker {
                Some('~') => Marker::Upper,
                Some(_) => Marker::Lower,
                None => Marker::Bare,
            },
            value,
            dotted: dotted.is_some(),
        },
    )(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

struct Builder<'a> {
    dim: &'a Dim,
}

impl Builder<'_> {
    fn build(&self, node: &Node) -> Result<Expr> {
        Ok(match node {
            Node::Integer(n) => Expr::integer(n.clone()),
            Node::Atom { name, label, args } => self.atom(name, *label, args.as_deref())?,
            Node::Add(a, b) => self.build(a)? + self.build(b)?,
            Node::Sub(a, b) => self.build(a)? - self.build(b)?,
            Node::Mul(a, b) => self.build(a)? * self.build(b)?,
            Node::Div(a, b) => {
                let divisor = self.build(b)?;
                let inverse = divisor
                    .as_number()
                    .and_then(|n| n.recip())
                    .ok_or_else(|| {
                        AlgebraError::Unsupported(format!("division by non-number {divisor}"))
                    })?;
                self.build(a)? * Expr::number(inverse)
            }
            Node::Pow(base, exp) => {
                if *exp > MAX_EXPONENT {
                    return Err(parse_error(format!(
                        "exponent {exp} exceeds the limit of {MAX_EXPONENT}"
                    )));
                }
                let base = self.build(base)?;
                Expr::product(std::iter::repeat(base).take(*exp as usize).chain([one()]))
            }
            Node::Neg(inner) => -self.build(inner)?,
        })
    }

    fn atom(&self, name: &str, label: Option<u8>, args: Option<&[IndexSpec]>) -> Result<Expr> {
        let rl = label.unwrap_or(0);
        let Some(args) = args else {
            return match name {
                "one" => Ok(dirac_one(rl)),
                "gamma5" => Ok(dirac_gamma5(rl)),
                "gamma6" => Ok(dirac_gamma6(rl)),
                "gamma7" => Ok(dirac_gamma7(rl)),
                _ if label.is_some() => Err(parse_error(format!("{name} takes no label"))),
                "I" => Ok(Expr::i()),
                _ => Ok(Expr::symbol(name)),
            };
        };

        match (name, args) {
            ("gamma", [i]) => dirac_gamma(self.varying(i, self.dim.clone()), rl),
            ("slash", [v]) => match (&v.value, v.marker) {
                (IndexValue::Symbol(s), Marker::Bare) => {
                    dirac_slash(&Expr::symbol(s.clone()), self.dim.clone(), rl)
                }
                _ => Err(parse_error(format!("slash expects a vector name, got {}", v.value))),
            },
            _ if label.is_some() => Err(parse_error(format!("{name} takes no label"))),
            ("delta", [a, b]) => Ok(delta_tensor(self.index(a), self.index(b))),
            ("g", [a, b]) => metric_tensor(self.varying(a, self.dim.clone()), self.varying(b, self.dim.clone())),
            ("eta" | "eta_p", [a, b]) => lorentz_g(
                self.varying(a, self.dim.clone()),
                self.varying(b, self.dim.clone()),
                name == "eta_p",
            ),
            ("seps", [a, b]) => spinor_metric(spinor(a), spinor(b)),
            ("eps", _) => {
                let dim = Dim::Concrete(args.len() as u32);
                epsilon_tensor(args.iter().map(|s| self.with_dim(s, dim.clone())).collect())
            }
            ("leps" | "leps_p", [a, b, c, d]) => {
                let v = |s: &IndexSpec| self.varying(s, Dim::Concrete(4));
                lorentz_eps(v(a), v(b), v(c), v(d), name == "leps_p")
            }
            ("one" | "gamma" | "gamma5" | "gamma6" | "gamma7" | "slash" | "delta" | "g" | "eta"
            | "eta_p" | "seps" | "leps" | "leps_p", _) => Err(parse_error(format!(
                "wrong number of indices for {name}: {}",
                args.len()
            ))),
            _ => Expr::indexed(
                Base::Symbol(name.to_string()),
                args.iter().map(|s| self.index(s)).collect(),
            ),
        }
    }

    fn index(&self, spec: &IndexSpec) -> Index {
        self.with_dim(spec, self.dim.clone())
    }

    fn with_dim(&self, spec: &IndexSpec, dim: Dim) -> Index {
        let kind = match spec.marker {
            Marker::Bare => IndexKind::Plain,
            Marker::Upper => IndexKind::Varying { covariant: false },
            Marker::Lower => IndexKind::Varying { covariant: true },
        };
        Index::new(spec.value.clone(), kind, dim)
    }

    /// A bare index is read as an upper one.
    fn varying(&self, spec: &IndexSpec, dim: Dim) -> Index {
        let covariant = spec.marker == Marker::Lower;
        Index::new(spec.value.clone(), IndexKind::Varying { covariant }, dim)
    }
}

fn spinor(spec: &IndexSpec) -> Index {
    Index::new(
        spec.value.clone(),
        IndexKind::Spinor {
            covariant: spec.marker == Marker::Lower,
            dotted: spec.dotted,
        },
        2,
    )
}

fn parse_error(msg: String) -> AlgebraError {
    AlgebraError::Parse(msg)
}
