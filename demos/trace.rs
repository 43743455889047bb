use diracalg::{Expr, ScalarProducts, dirac_trace, expand, parse_expr, simplify_indexed};

fn main() {
    let mut products = ScalarProducts::new();
    for (a, b, value) in [("l", "l", "l^2"), ("q", "q", "q^2"), ("l", "q", "ldotq")] {
        match parse_expr(value) {
            Ok(v) => products.add(a, b, v),
            Err(err) => eprintln!("parse error for {value}: {err}"),
        }
    }

    let loop_expr = "gamma(~mu)*(slash(l) + slash(q) + m*one)*gamma(.mu)*(slash(l) + m*one)";
    let traced = parse_expr(loop_expr)
        .and_then(|e| dirac_trace(&e, 0, &Expr::integer(4)))
        .and_then(|t| simplify_indexed(&t, &products));
    match traced {
        Ok(result) => println!("trace {loop_expr} => {}", expand(&result)),
        Err(err) => eprintln!("error for {loop_expr}: {err}"),
    }

    let contract_expr = "gamma(~mu)*gamma(~a)*gamma(~b)*gamma(.mu)";
    match parse_expr(contract_expr).and_then(|e| simplify_indexed(&e, &products)) {
        Ok(result) => println!("contract {contract_expr} => {result}"),
        Err(err) => eprintln!("error for {contract_expr}: {err}"),
    }
}
