//! Exact Gaussian rationals used as expression coefficients.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type Rational = BigRational;

/// `re + im*I` with both parts exact rationals.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Number {
    re: Rational,
    im: Rational,
}

impl Number {
    pub fn new(re: Rational, im: Rational) -> Self {
        Number { re, im }
    }

    pub fn zero() -> Self {
        Number::new(Rational::zero(), Rational::zero())
    }

    pub fn one() -> Self {
        Number::new(Rational::one(), Rational::zero())
    }

    pub fn i() -> Self {
        Number::new(Rational::zero(), Rational::one())
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Number::new(Rational::from_integer(value.into()), Rational::zero())
    }

    pub fn fraction(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Number::new(Rational::new(num.into(), den.into()), Rational::zero())
    }

    pub fn re(&self) -> &Rational {
        &self.re
    }

    pub fn im(&self) -> &Rational {
        &self.im
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    /// True when the leading nonzero part is negative; used to print `a - b` instead of `a + -b`.
    pub fn is_negative(&self) -> bool {
        if self.re.is_zero() {
            self.im.is_negative()
        } else {
            self.re.is_negative()
        }
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn recip(&self) -> Option<Number> {
        if self.is_zero() {
            return None;
        }
        let norm = &self.re * &self.re + &self.im * &self.im;
        Some(Number::new(&self.re / &norm, -(&self.im / &norm)))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::integer(value)
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Number::new(value, Rational::zero())
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, rhs: &Number) -> Number {
        Number::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        &self + &rhs
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, rhs: Number) -> Number {
        &self + &(-rhs)
    }
}

impl Mul for &Number {
    type Output = Number;

    fn mul(self, rhs: &Number) -> Number {
        Number::new(
            &self.re * &rhs.re - &self.im * &rhs.im,
            &self.re * &rhs.im + &self.im * &rhs.re,
        )
    }
}

impl Mul for Number {
    type Output = Number;

    fn mul(self, rhs: Number) -> Number {
        &self * &rhs
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        Number::new(-self.re, -self.im)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            return write!(f, "{}", show_rational(&self.re));
        }
        let imag = if self.im.is_one() {
            "I".to_string()
        } else if (-self.im.clone()).is_one() {
            "-I".to_string()
        } else {
            format!("{}*I", show_rational(&self.im))
        };
        if self.re.is_zero() {
            write!(f, "{imag}")
        } else if self.im.is_negative() {
            write!(f, "({}{})", show_rational(&self.re), imag)
        } else {
            write!(f, "({}+{})", show_rational(&self.re), imag)
        }
    }
}

fn show_rational(r: &Rational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
