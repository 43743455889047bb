use diracalg::{AlgebraError, Expr, Limits, canonicalize_clifford, canonicalize_clifford_with_limits, expand, parse_expr};

fn parsed(input: &str) -> Expr {
    parse_expr(input).expect("parse input")
}

fn expect_canonical(input: &str, expected: &str) {
    let actual = canonicalize_clifford(&parsed(input)).expect("canonicalize");
    let expected_expr = parsed(expected);
    let diff = expand(&(actual.clone() - expected_expr.clone()));
    assert!(diff.is_zero(), "canonical form of {input}: got {actual}, expected {expected_expr}");
}

#[test]
fn anticommutator_reorders_pairs() {
    expect_canonical("gamma(~b)*gamma(~a)", "2*eta(~a,~b)*one - gamma(~a)*gamma(~b)");
    expect_canonical("gamma(~a)*gamma(~b) + gamma(~b)*gamma(~a)", "2*eta(~a,~b)*one");
}

#[test]
fn three_gamma_reversal() {
    expect_canonical(
        "gamma(~c)*gamma(~b)*gamma(~a)",
        "2*eta(~b,~c)*gamma(~a) - 2*eta(~a,~c)*gamma(~b) + 2*eta(~a,~b)*gamma(~c) \
         - gamma(~a)*gamma(~b)*gamma(~c)",
    );
}

#[test]
fn sorted_words_and_scalars_pass_through() {
    expect_canonical("x*gamma(~a)*gamma(~b)*gamma(~c) + y*one", "x*gamma(~a)*gamma(~b)*gamma(~c) + y*one");
    expect_canonical("gamma5*gamma(~a)*gamma(~b)", "gamma5*gamma(~a)*gamma(~b)");
}

#[test]
fn gamma5_stays_in_front() {
    expect_canonical("gamma5*gamma(~b)*gamma(~a)", "2*eta(~a,~b)*gamma5 - gamma5*gamma(~a)*gamma(~b)");
}

#[test]
fn independent_labels_are_each_sorted() {
    expect_canonical(
        "gamma[1](~b)*gamma[1](~a)*gamma(~d)*gamma(~c)",
        "(2*eta(~a,~b)*one[1] - gamma[1](~a)*gamma[1](~b))*(2*eta(~c,~d)*one - gamma(~c)*gamma(~d))",
    );
}

#[test]
fn depth_budget() {
    let e = parsed("gamma(~d)*gamma(~c)*gamma(~b)*gamma(~a)");
    let err = canonicalize_clifford_with_limits(&e, &Limits::new(2, 8)).unwrap_err();
    assert_eq!(err, AlgebraError::DepthExceeded { limit: 2 });
}
