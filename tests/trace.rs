use diracalg::{
    Dim, Expr, ScalarProducts, dirac_trace, expand, parse_expr, parse_expr_with_dim,
    simplify_indexed,
};

fn parsed(input: &str) -> Expr {
    parse_expr(input).expect("parse input")
}

fn trace(e: &Expr) -> Expr {
    dirac_trace(e, 0, &Expr::integer(4)).expect("trace")
}

fn expect_equal(actual: &Expr, expected: &Expr) {
    let diff = expand(&(actual.clone() - expected.clone()));
    assert!(diff.is_zero(), "got {actual}, expected {expected}, difference {diff}");
}

fn loop_products() -> ScalarProducts {
    let mut sp = ScalarProducts::new();
    sp.add("q", "q", parsed("q^2"));
    sp.add("l", "l", parsed("l^2"));
    sp.add("l", "q", parsed("ldotq"));
    sp
}

#[test]
fn vanishing_traces() {
    for input in [
        "gamma(~mu)",
        "gamma(~mu)*gamma(~nu)*gamma(~rho)",
        "gamma5",
        "gamma5*gamma(~mu)",
        "gamma5*gamma(~mu)*gamma(~nu)",
        "gamma5*gamma(~mu)*gamma(~nu)*gamma(~rho)",
        "x",
    ] {
        assert!(trace(&parsed(input)).is_zero(), "trace of {input} should vanish");
    }
}

#[test]
fn low_order_traces() {
    expect_equal(&trace(&parsed("one")), &parsed("4"));
    expect_equal(&trace(&parsed("x*one")), &parsed("4*x"));
    expect_equal(&trace(&parsed("gamma(~a)*gamma(~b)")), &parsed("4*eta(~a,~b)"));
    expect_equal(
        &trace(&parsed("gamma(~a)*gamma(~b)*gamma(~c)*gamma(~d)")),
        &parsed("4*(eta(~a,~b)*eta(~c,~d) - eta(~a,~c)*eta(~b,~d) + eta(~a,~d)*eta(~b,~c))"),
    );
}

#[test]
fn gamma5_with_four_gammas() {
    let dim = Dim::Concrete(4);
    let e = parse_expr_with_dim("gamma5*gamma(~a)*gamma(~b)*gamma(~c)*gamma(~d)", &dim).unwrap();
    let expected = parse_expr_with_dim("4*I*leps(~a,~b,~c,~d)", &dim).unwrap();
    expect_equal(&trace(&e), &expected);
}

#[test]
fn other_label_is_carried_along() {
    let e = parsed("gamma[1](~mu)*gamma(~a)*gamma(~b)");
    expect_equal(&trace(&e), &parsed("4*eta(~a,~b)*gamma[1](~mu)"));
    assert!(dirac_trace(&parsed("gamma(~a)*gamma(~b)"), 1, &Expr::integer(4)).unwrap().is_zero());
}

#[test]
fn cyclicity_without_gamma5() {
    let e = parsed(
        "gamma(~mu)*gamma(~nu)*gamma(~rho)*gamma(~sig) - gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~mu)",
    );
    assert!(expand(&trace(&e)).is_zero());

    let e = parsed(
        "gamma(~mu)*gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~kap)*gamma(~lam) \
         - gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~kap)*gamma(~lam)*gamma(~mu)",
    );
    assert!(expand(&trace(&e)).is_zero());
}

#[test]
fn cyclicity_of_gamma5_with_four_gammas() {
    let e = parsed(
        "gamma5*gamma(~mu)*gamma(~nu)*gamma(~rho)*gamma(~sig) \
         - gamma(~sig)*gamma5*gamma(~mu)*gamma(~nu)*gamma(~rho)",
    );
    assert!(expand(&trace(&e)).is_zero());
}

#[test]
fn gamma5_with_six_gammas_breaks_cyclicity_at_order_d_minus_4() {
    let e = parsed(
        "gamma5*gamma(~mu)*gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~kap)*gamma(.mu) \
         + D*gamma5*gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~kap)",
    );
    let traced = simplify_indexed(&trace(&e), &ScalarProducts::new()).unwrap();
    let four = trace(&parsed("gamma5*gamma(~nu)*gamma(~rho)*gamma(~sig)*gamma(~kap)"));
    let expected = parsed("2*(D - 4)") * four;
    expect_equal(&traced, &expected);
}

#[test]
fn squared_slash() {
    let e = parsed("m^2*slash(q)*slash(q)");
    let out = simplify_indexed(&trace(&e), &loop_products()).unwrap();
    expect_equal(&out, &parsed("4*m^2*q^2"));
}

#[test]
fn vacuum_polarization() {
    let sp = loop_products();

    let e = parsed("gamma(~mu)*(slash(l) + slash(q) + m*one)*gamma(.mu)*(slash(l) + m*one)");
    let out = simplify_indexed(&trace(&e), &sp).unwrap();
    expect_equal(&out, &parsed("4*((2 - D)*l^2 + (2 - D)*ldotq + D*m^2)"));

    let e = parsed("slash(q)*(slash(l) + slash(q) + m*one)*slash(q)*(slash(l) + m*one)");
    let out = simplify_indexed(&trace(&e), &sp).unwrap();
    expect_equal(&out, &parsed("4*(2*ldotq^2 + q^2*ldotq - q^2*l^2 + q^2*m^2)"));
}

#[test]
fn contraction_before_or_after_trace_agree() {
    let e = parsed("gamma(~mu)*gamma(~a)*gamma(~b)*gamma(.mu)*gamma(~c)*gamma(~d)");
    let sp = ScalarProducts::new();
    let contract_first = trace(&simplify_indexed(&e, &sp).unwrap());
    let trace_first = simplify_indexed(&trace(&e), &sp).unwrap();
    expect_equal(&contract_first, &trace_first);
}

#[test]
fn products_without_the_label_are_returned() {
    expect_equal(&trace(&parsed("x*y")), &parsed("x*y"));
    expect_equal(&trace(&parsed("x*gamma[1](~mu)")), &parsed("x*gamma[1](~mu)"));
}
