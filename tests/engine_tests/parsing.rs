use super::*;
use symexpr::{ExprError, TranslationError};

fn first_error(text: &str) -> Option<TranslationError> {
  let e = Expression::parse(&Lexicon::new(), text);
  match e.errors().first() {
    Some(ExprError::Translation(error)) => Some(error.clone()),
    _ => None,
  }
}

#[test]
fn renders_with_minimal_parentheses() {
  let same = |e: &Expression| e.clone();
  assert_eq!(rendered("r*2+sin(x)", same), "r * 2 + sin(x)");
  assert_eq!(rendered("((a))", same), "a");
  assert_eq!(rendered("a*(b+c)", same), "a * (b + c)");
  assert_eq!(rendered("a-(b+c)", same), "a - (b + c)");
  assert_eq!(rendered("a^(b^c)", same), "a ^ (b ^ c)");
  assert_eq!(rendered("max(a,b)*min(c,d)", same), "max(a, b) * min(c, d)");
  assert_eq!(rendered("a<b and b<=c or d", same), "a < b and b <= c or d");
}

#[test]
fn call_style_equals_infix_order() {
  let lexicon = Lexicon::new();
  lexicon.assign("a", 2.0).unwrap();
  lexicon.assign("b", 5.0).unwrap();
  let call = Expression::parse(&lexicon, "max(a - 1, b * 2) + 1");
  assert_eq!(call.to_number(), 11.0);
  let nested = Expression::parse(&lexicon, "min(max(a, b), Fmac1(b, a))");
  assert_eq!(nested.to_number(), 3.0);
}

#[test]
fn identifiers_become_variables() {
  let lexicon = Lexicon::new();
  Expression::parse(&lexicon, "sigma_xx * area + sin(theta)");
  assert_eq!(lexicon.variable_names(), vec!["sigma_xx", "area", "theta"]);
}

#[test]
fn translation_errors() {
  assert_eq!(first_error(""), Some(TranslationError::Empty));
  assert_eq!(
    first_error("2 * * 3"),
    Some(TranslationError::IllegalOperator {
      offset: 4,
      operator: "*".to_string()
    })
  );
  assert_eq!(
    first_error("(1 + 2"),
    Some(TranslationError::UnmatchedParen { offset: 0 })
  );
  assert_eq!(
    first_error("1 $ 2"),
    Some(TranslationError::UnknownSymbol {
      offset: 2,
      symbol: "$".to_string()
    })
  );
  assert_eq!(
    first_error("Fmac2(x)"),
    Some(TranslationError::CallArity {
      offset: 0,
      name: "Fmac2".to_string(),
      found: 1
    })
  );
  assert_eq!(
    first_error("x y"),
    Some(TranslationError::MissingOperator { offset: 2 })
  );
  assert_eq!(
    first_error("x +"),
    Some(TranslationError::Truncated { offset: 3 })
  );
}

#[test]
fn every_error_is_reported() {
  let e = Expression::parse(&Lexicon::new(), "max(a) + (b $");
  assert_eq!(e.errors().len(), 3);
  assert!(e.root().is_none());
  assert!(e.to_number().is_nan());
}
