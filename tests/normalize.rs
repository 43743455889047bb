use diracalg::{Expr, expand, parse_expr};

fn parsed(input: &str) -> Expr {
    parse_expr(input).expect("parse input")
}

fn expect_normalized(input: &str, expected: &str) {
    let actual = parsed(input);
    let expected_expr = parsed(expected);
    let diff = expand(&(actual.clone() - expected_expr.clone()));
    assert!(
        diff.is_zero(),
        "normalization mismatch for {input}: got {actual}, expected {expected_expr}"
    );
}

#[test]
fn unit_and_scalars() {
    let cases = vec![
        ("one*one", "one"),
        ("one*gamma(~mu)*one", "gamma(~mu)"),
        ("2*x*3*one", "6*x*one"),
        ("x*one + one*x", "2*x*one"),
        ("gamma(~mu)*x", "x*gamma(~mu)"),
        ("I*I*one", "-one"),
    ];
    for (input, expected) in cases {
        expect_normalized(input, expected);
    }
}

#[test]
fn gamma5_anticommutes() {
    let cases = vec![
        ("gamma(~mu)*gamma5 + gamma5*gamma(~mu)", "0"),
        ("gamma5*gamma(~mu)*gamma5 + gamma(~mu)", "0"),
        ("gamma5*gamma5", "one"),
        ("gamma(~a)*gamma(~b)*gamma5", "gamma5*gamma(~a)*gamma(~b)"),
        ("gamma(~a)*gamma5*gamma(~b)", "-gamma5*gamma(~a)*gamma(~b)"),
    ];
    for (input, expected) in cases {
        expect_normalized(input, expected);
    }
}

#[test]
fn chiral_projectors() {
    let cases = vec![
        ("gamma6*gamma7", "0"),
        ("gamma7*gamma6", "0"),
        ("gamma6*gamma6", "2*gamma6"),
        ("gamma7*gamma7", "2*gamma7"),
        ("gamma6 + gamma7", "2*one"),
    ];
    for (input, expected) in cases {
        expect_normalized(input, expected);
    }
}

#[test]
fn equal_neighbours_become_metric() {
    expect_normalized("gamma(~mu)*gamma(~mu)", "eta(~mu,~mu)*one");
    expect_normalized(
        "gamma(~a)*gamma(~mu)*gamma(~mu)*gamma(~b)",
        "eta(~mu,~mu)*gamma(~a)*gamma(~b)",
    );
}

#[test]
fn numeric_indices_square_to_signature() {
    expect_normalized("gamma(~2)*gamma(~1)*gamma(~1)*gamma(~2)", "one");
    expect_normalized("gamma(~0)*gamma(~0)", "one");
    expect_normalized("gamma(~3)*gamma(~3)", "-one");
}

#[test]
fn labels_commute() {
    expect_normalized("gamma[1](~a)*gamma(~b)", "gamma(~b)*gamma[1](~a)");
    expect_normalized("gamma5[1]*gamma(~a)*gamma5[1]", "gamma(~a)*one[1]");
    expect_normalized("gamma5[1]*gamma[2](~a)", "gamma[2](~a)*gamma5[1]");
}

#[test]
fn normalization_is_a_fixed_point() {
    let e = parsed("gamma(~a)*gamma5*gamma(~b)*gamma(~b)*gamma5*gamma(~c)");
    let again = Expr::product(match &e {
        Expr::Mul(factors) => factors.clone(),
        other => vec![other.clone()],
    });
    assert_eq!(again, e);
}

#[test]
fn sums_spanning_labels_keep_factor_order() {
    expect_normalized(
        "(gamma[1](~c) + x*gamma(~a))*gamma(~b)",
        "x*gamma(~a)*gamma(~b) + gamma[1](~c)*gamma(~b)",
    );
    expect_normalized(
        "gamma(~b)*(gamma[1](~c) + gamma(~a))",
        "gamma(~b)*gamma(~a) + gamma(~b)*gamma[1](~c)",
    );
    let swapped = parsed("gamma(~b)*gamma(~a) + gamma[1](~c)*gamma(~b)");
    let e = parsed("(gamma[1](~c) + gamma(~a))*gamma(~b)");
    assert!(!expand(&(e - swapped)).is_zero());
}
