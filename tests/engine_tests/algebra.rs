use super::*;

mod simplify {
  use super::*;

  #[test]
  fn identities() {
    let simplify = |e: &Expression| e.simplify();
    assert_eq!(rendered("x + 0", simplify), "x");
    assert_eq!(rendered("0 + x * 1", simplify), "x");
    assert_eq!(rendered("1 * (x - 0)", simplify), "x");
    assert_eq!(rendered("(a + b) * 0", simplify), "0");
    assert_eq!(rendered("x ^ 1 + y ^ 0", simplify), "x + 1");
    assert_eq!(rendered("--x / 1", simplify), "x");
  }

  #[test]
  fn works_bottom_up() {
    let simplify = |e: &Expression| e.simplify();
    assert_eq!(rendered("sin(x * 1 + 0) * (0 + 1)", simplify), "sin(x)");
    assert_eq!(rendered("max(a * 1, 0 + b)", simplify), "max(a, b)");
  }

  #[test]
  fn does_not_fold() {
    let simplify = |e: &Expression| e.simplify();
    assert_eq!(rendered("2 * 3 + x", simplify), "2 * 3 + x");
  }
}

mod distribute {
  use super::*;

  #[test]
  fn both_sides() {
    let distribute = |e: &Expression| e.distribute();
    assert_eq!(rendered("a*(b+c)", distribute), "a * b + a * c");
    assert_eq!(rendered("(b-c)*a", distribute), "b * a - c * a");
  }

  #[test]
  fn leaves_other_operators() {
    let distribute = |e: &Expression| e.distribute();
    assert_eq!(rendered("a/(b+c)", distribute), "a / (b + c)");
    assert_eq!(rendered("(a+b)^2", distribute), "(a + b) ^ 2");
  }

  #[test]
  fn distribute_then_expand_matches_after_folding() {
    let lexicon = Lexicon::new();
    let distributed = Expression::parse(&lexicon, "a*(b+c)")
      .distribute()
      .expand();
    let expected = Expression::parse(&lexicon, "a*b+a*c");
    assert_eq!(distributed.to_string(), expected.to_string());
    lexicon.bind_all("a=2, b=3, c=5").unwrap();
    assert_eq!(distributed.eval().to_number(), 16.0);
    assert_eq!(distributed.eval(), expected.eval());
  }
}

mod expand {
  use super::*;

  #[test]
  fn inlines_nested_definitions() {
    let lexicon = Lexicon::new();
    lexicon.bind_all("s = b + c, t = s * d").unwrap();
    let e = Expression::parse(&lexicon, "a * t");
    assert_eq!(e.distribute().to_string(), "a * t");
    assert_eq!(e.expand().to_string(), "a * (b * d) + a * (c * d)");
  }

  #[test]
  fn keeps_cyclic_definitions_as_variables() {
    let lexicon = Lexicon::new();
    lexicon.bind_all("n = n + 1").unwrap();
    let e = Expression::parse(&lexicon, "2 * n");
    assert_eq!(e.expand().to_string(), "2 * n + 2 * 1");
    assert!(e.to_number().is_nan());
  }
}

mod substitute {
  use super::*;

  #[test]
  fn replaces_by_identity_with_copies() {
    let lexicon = Lexicon::new();
    let e = Expression::parse(&lexicon, "x * y + x");
    let with = Expression::parse(&lexicon, "x + 1");
    let replaced = e.substitute("x", &with);
    assert_eq!(replaced.to_string(), "(x + 1) * y + (x + 1)");
    assert_eq!(e.to_string(), "x * y + x");
  }

  #[test]
  fn foreign_replacement_is_an_error() {
    let e = Expression::parse(&Lexicon::new(), "x + 1");
    let other = Expression::parse(&Lexicon::new(), "y");
    assert!(e.substitute("x", &other).has_errors());
  }
}
