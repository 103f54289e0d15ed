use super::*;
use rstest::rstest;

#[rstest]
#[case("2+3*4", 14.0)]
#[case("(2+3)*4", 20.0)]
#[case("10 - 4 - 3", 3.0)]
#[case("2^3^2", 64.0)]
#[case("-2^2", 4.0)]
#[case("-(2^2)", -4.0)]
#[case("7 div 2", 3.0)]
#[case("-7 div 2", -3.0)]
#[case("7 mod 3", 1.0)]
#[case("-7 mod 3", -1.0)]
#[case("max(3,7)", 7.0)]
#[case("min(3,7)", 3.0)]
#[case("max(1, 2) * 3", 6.0)]
#[case("1.5e2 + .5", 150.5)]
fn arithmetic(#[case] text: &str, #[case] expected: f64) {
  assert_eq!(value(text), expected);
}

#[rstest]
#[case("3 < 4", 1.0)]
#[case("3 >= 4", 0.0)]
#[case("2 == 2", 1.0)]
#[case("2 != 2", 0.0)]
#[case("1 and 0", 0.0)]
#[case("1 or 0", 1.0)]
#[case("not 0", 1.0)]
#[case("1 < 2 and 3 < 4", 1.0)]
#[case("0 or 2 > 1 and 1 > 2", 0.0)]
fn comparisons_and_logic(#[case] text: &str, #[case] expected: f64) {
  assert_eq!(value(text), expected);
}

#[test]
fn macaulay_brackets() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "Fmac2(x, a)");
  lexicon.assign("a", 1.5).unwrap();
  lexicon.assign("x", 1.0).unwrap();
  assert_eq!(f.to_number(), 0.0);
  lexicon.assign("x", 1.5).unwrap();
  assert_eq!(f.to_number(), 0.0);
  lexicon.assign("x", 1.5 + 0.25).unwrap();
  assert_eq!(f.to_number(), 0.25 * 0.25);
  assert_eq!(value("Fmac0(3, 1)"), 1.0);
  assert_eq!(value("Fmac0(1, 3)"), 0.0);
  assert_eq!(value("Fmac3(4, 2)"), 8.0);
}

#[test]
fn functions() {
  let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
  assert!(close(value("sin(PI(0.5))"), 1.0));
  assert!(close(value("rad2deg(atan(1))"), 45.0));
  assert!(close(value("sqr(sec(0.3)) - sqr(tan(0.3))"), 1.0));
  assert!(close(value("lg(100) + ln(exp(2))"), 4.0));
  assert_eq!(value("abs(-3) + sign(-2) + sqrt(16) + inv(4)"), 6.25);
  assert_eq!(value("round(2.5) + trunc(-2.7) + tonum(1)"), 2.0);
}

#[test]
fn unassigned_variable_is_nan() {
  assert!(value("r * 2").is_nan());
  assert!(value("sin(").is_nan());
}

#[test]
fn variables_follow_the_lexicon() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "r*2 + sin(x)");
  lexicon.assign("r", 1.5).unwrap();
  lexicon.assign("x", 0.0).unwrap();
  assert_eq!(f.to_number(), 3.0);
  lexicon.assign("r", 4.0).unwrap();
  assert_eq!(f.to_number(), 8.0);
  lexicon.unassign("x");
  assert!(f.to_number().is_nan());
  assert_eq!(f.free_variables(), vec!["x"]);
}

#[test]
fn partial_evaluation() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "a * (2 + 3) + b * c");
  lexicon.assign("c", 2.0).unwrap();
  assert_eq!(f.eval().to_string(), "a * 5 + b * 2");
  assert_eq!(f.eval_bindings("a=1, b=a").to_number(), 7.0);
}

#[test]
fn top_level_evaluate() {
  assert_eq!(symexpr::evaluate("b*h/2", "b=3, h=4").unwrap(), 6.0);
  assert_eq!(symexpr::evaluate("2 + 2", "").unwrap(), 4.0);
  assert!(symexpr::evaluate("b*h", "b=3").is_err());
}
