use diracalg::{
    AlgebraError, Expr, Index, delta_tensor, epsilon_tensor, lorentz_eps, lorentz_g,
    metric_tensor, parse_expr, permutation_sign, spinor_metric,
};

fn up(name: &str) -> Index {
    Index::varying(name, "D")
}

#[test]
fn delta_values() {
    let i = Index::plain(1, 3);
    let j = Index::plain(2, 3);
    assert_eq!(delta_tensor(i.clone(), i.clone()), Expr::integer(1));
    assert!(delta_tensor(i, j).is_zero());
    let k = Index::plain("k", 3);
    assert_eq!(delta_tensor(k.clone(), k), Expr::integer(3));
}

#[test]
fn symmetric_tensors_ignore_index_order() {
    assert_eq!(parse_expr("eta(~b,~a)").unwrap(), parse_expr("eta(~a,~b)").unwrap());
    assert_eq!(parse_expr("g(~b,.a)").unwrap(), parse_expr("delta(.a,~b)").unwrap());
    assert_eq!(delta_tensor(up("b"), up("a")), delta_tensor(up("a"), up("b")));
}

#[test]
fn antisymmetric_tensors_collect_sign() {
    let e = parse_expr("leps(~b,~a,~c,~d)").unwrap();
    let expected = -parse_expr("leps(~a,~b,~c,~d)").unwrap();
    assert_eq!(e, expected);
    assert!(parse_expr("leps(~a,~a,~c,~d)").unwrap().is_zero());
    assert!(parse_expr("seps(A,A)").unwrap().is_zero());
}

#[test]
fn lorentz_metric_signature() {
    let g = |a: u32, b: u32, pos: bool| {
        lorentz_g(Index::varying(a, 4), Index::varying(b, 4), pos).unwrap()
    };
    for k in 1..4 {
        assert_eq!(g(k, k, false), Expr::integer(-1));
        assert_eq!(g(k, k, true), Expr::integer(1));
        assert!(g(0, k, false).is_zero());
    }
    assert_eq!(g(0, 0, false), Expr::integer(1));
    assert_eq!(g(0, 0, true), Expr::integer(-1));
}

#[test]
fn epsilon_component_values() {
    let up4 = |n: u32| Index::varying(n, 4);
    let lo4 = |n: u32| Index::varying(n, 4).toggle_variance();
    assert_eq!(lorentz_eps(up4(0), up4(1), up4(2), up4(3), false).unwrap(), Expr::integer(1));
    assert_eq!(lorentz_eps(up4(1), up4(0), up4(2), up4(3), false).unwrap(), Expr::integer(-1));
    assert_eq!(lorentz_eps(lo4(0), lo4(1), lo4(2), lo4(3), false).unwrap(), Expr::integer(-1));
    assert_eq!(lorentz_eps(lo4(0), lo4(1), lo4(2), lo4(3), true).unwrap(), Expr::integer(-1));
    assert_eq!(lorentz_eps(lo4(0), up4(1), up4(2), up4(3), false).unwrap(), Expr::integer(1));

    let plain = |v: &[u32]| {
        epsilon_tensor(v.iter().map(|&n| Index::plain(n, v.len() as u32)).collect()).unwrap()
    };
    assert_eq!(plain(&[0, 1]), Expr::integer(1));
    assert_eq!(plain(&[1, 0]), Expr::integer(-1));
    assert_eq!(plain(&[1, 2, 0]), Expr::integer(1));
    assert!(plain(&[1, 1, 0]).is_zero());
}

#[test]
fn spinor_metric_values() {
    let s = |a: u32, b: u32| spinor_metric(Index::spinor(a, 2), Index::spinor(b, 2)).unwrap();
    assert_eq!(s(0, 1), Expr::integer(1));
    assert_eq!(s(1, 0), Expr::integer(-1));
    assert!(s(0, 0).is_zero());
}

#[test]
fn construction_errors() {
    assert!(matches!(
        metric_tensor(Index::plain("i", 4), up("a")),
        Err(AlgebraError::InvalidIndex(_))
    ));
    assert!(matches!(
        spinor_metric(Index::spinor("A", 3), Index::spinor("B", 3)),
        Err(AlgebraError::DimensionMismatch(_))
    ));
    assert!(matches!(
        epsilon_tensor(vec![Index::plain("i", 3), Index::plain("j", 2)]),
        Err(AlgebraError::DimensionMismatch(_))
    ));
    assert!(matches!(
        lorentz_eps(up("a"), up("b"), up("c"), up("d"), false),
        Err(AlgebraError::DimensionMismatch(_))
    ));
    assert!(matches!(parse_expr("seps(A)"), Err(AlgebraError::Parse(_))));
}

#[test]
fn index_substitution_reevaluates() {
    let e = parse_expr("eta(~mu,~nu)*q(.nu)").unwrap();
    let from = up("nu");
    let to = Index::varying(2, "D");
    let out = e.subs_index(&from, &to);
    assert_eq!(out, parse_expr("eta(~mu,~2)*q(.nu)").unwrap());

    let swapped = parse_expr("leps(~a,~b,~c,~d)").unwrap().subs_index(
        &Index::varying("a", 4),
        &Index::varying("e", 4),
    );
    assert_eq!(swapped, -parse_expr("leps(~b,~c,~d,~e)").unwrap());
}

#[test]
fn free_indices_of_products() {
    let e = parse_expr("eta(~mu,~nu)*q(.nu)*p(~rho)").unwrap();
    let mut free = e.free_indices();
    free.sort();
    assert_eq!(free, vec![up("mu"), up("rho")]);
}

#[test]
fn permutation_signs() {
    assert_eq!(permutation_sign(&mut [0, 1, 2, 3]), 1);
    assert_eq!(permutation_sign(&mut [3, 2, 1, 0]), 1);
    assert_eq!(permutation_sign(&mut [1, 0, 2, 3]), -1);
    assert_eq!(permutation_sign(&mut ["b", "a", "c"]), -1);
    assert_eq!(permutation_sign(&mut [2, 5, 2]), 0);
}
