use super::*;
use symexpr::NewtonOptions;

fn derivative(text: &str, var: &str) -> String {
  rendered(text, |e| e.differentiate(var).simplify())
}

#[test]
fn polynomial() {
  assert_eq!(derivative("x^3", "x"), "3 * x ^ (3 - 1)");
  assert_eq!(derivative("5*x + 2", "x"), "5");
  assert_eq!(derivative("y * x", "y"), "x");
  assert_eq!(derivative("7", "x"), "0");
}

#[test]
fn chain_rule() {
  assert_eq!(derivative("sin(2*x)", "x"), "cos(2 * x) * 2");
  assert_eq!(derivative("exp(x)", "x"), "exp(x)");
  assert_eq!(derivative("ln(x)", "x"), "1 / x");
}

#[test]
fn values_match_finite_differences() {
  let lexicon = Lexicon::new();
  lexicon.assign("k", 0.7).unwrap();
  let f = Expression::parse(&lexicon, "k*x^3 / (1 + sqr(x)) - cos(k*x)");
  let d = f.differentiate("x").simplify();
  for x in [-1.3, 0.2, 2.5] {
    let h = 1e-6;
    let numeric = (f.eval_at("x", x + h).to_number()
      - f.eval_at("x", x - h).to_number())
      / (2.0 * h);
    let exact = d.eval_at("x", x).to_number();
    assert!((exact - numeric).abs() < 1e-6, "x = {x}");
  }
}

#[test]
fn macaulay_derivative() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "Fmac2(x, 1)");
  let d = f.differentiate("x");
  assert_eq!(d.eval_at("x", 0.5).to_number(), 0.0);
  assert_eq!(d.eval_at("x", 3.0).to_number(), 4.0);
  let step = Expression::parse(&lexicon, "Fmac0(x, 1)").differentiate("x");
  assert_eq!(step.simplify().to_string(), "0");
}

#[test]
fn newton_square_root_of_two() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "x^2 - 2");
  let found = f.newton_root(&NewtonOptions::default(), "x", 1.0).unwrap();
  assert!(found.converged);
  assert!((found.root - std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn newton_with_bound_parameters() {
  let lexicon = Lexicon::new();
  lexicon.bind_all("E = 200, I = 8, L = 3").unwrap();
  // Deflection equal to 0.01 somewhere along the span
  let f = Expression::parse(&lexicon, "x^2 * (3*L - x) / (6*E*I) - 0.01");
  let found = f.newton_root(&NewtonOptions::default(), "x", 1.0).unwrap();
  assert!(found.converged);
  assert!(found.residual.abs() < 1e-9);
}
