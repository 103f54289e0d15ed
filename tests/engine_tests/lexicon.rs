use super::*;
use symexpr::{Binding, ExprError};

#[test]
fn interning_twice_returns_the_same_literal() {
  let lexicon = Lexicon::new();
  let a = lexicon.intern(2.5);
  let b = lexicon.intern(2.5);
  assert_eq!(a, b);
  assert_eq!(lexicon.ref_count(2.5), 2);
  assert_eq!(a.ref_count(), 2);
  drop(a);
  assert_eq!(lexicon.ref_count(2.5), 1);
  drop(b);
  assert_eq!(lexicon.ref_count(2.5), 0);
  lexicon.sweep();
  assert_eq!(lexicon.literal_count(), 0);
}

#[test]
fn trees_hold_literal_references() {
  let lexicon = Lexicon::new();
  let e = Expression::parse(&lexicon, "3 * x + 3");
  assert_eq!(lexicon.ref_count(3.0), 2);
  let copy = e.clone();
  assert_eq!(lexicon.ref_count(3.0), 4);
  drop(copy);
  drop(e);
  assert_eq!(lexicon.ref_count(3.0), 0);
}

#[test]
fn lookup_prefers_operators_over_variables() {
  let lexicon = Lexicon::new();
  assert!(matches!(lexicon.lookup("sin"), Some(symexpr::Signal::Unary(_))));
  assert!(lexicon.lookup("sine").is_none());
  assert!(matches!(
    lexicon.assign("max", 1.0),
    Err(ExprError::ReservedName(_))
  ));
}

#[test]
fn lexicons_are_independent() {
  let first = Lexicon::new();
  let second = Lexicon::new();
  let e = Expression::parse(&first, "x + 1");
  second.assign("x", 5.0).unwrap();
  assert!(e.to_number().is_nan());
  first.assign("x", 1.0).unwrap();
  assert_eq!(e.to_number(), 2.0);
  assert!(!first.same(&second));
  assert!(first.same(&first.clone()));
}

#[test]
fn bindings_and_definitions() {
  let lexicon = Lexicon::new();
  let x = lexicon.declare_variable("x");
  assert_eq!(lexicon.binding(&x), Binding::Unbound);
  lexicon.assign("x", 2.0).unwrap();
  assert_eq!(lexicon.binding(&x), Binding::Value(2.0));
  let area = Expression::parse(&lexicon, "x * y");
  lexicon.define("area", &area).unwrap();
  assert_eq!(lexicon.value_of("area"), None);
  lexicon.assign("y", 3.0).unwrap();
  assert_eq!(lexicon.value_of("area"), Some(6.0));
  let outer = Expression::parse(&lexicon, "area / 2");
  assert_eq!(outer.to_number(), 3.0);
}

#[test]
fn define_rejects_foreign_or_broken_expressions() {
  let lexicon = Lexicon::new();
  let foreign = Expression::parse(&Lexicon::new(), "a");
  assert_eq!(
    lexicon.define("f", &foreign),
    Err(ExprError::ForeignLexicon)
  );
  let broken = Expression::parse(&lexicon, "a +");
  assert!(matches!(
    lexicon.define("f", &broken),
    Err(ExprError::Translation(_))
  ));
}
