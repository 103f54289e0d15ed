use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAMES: [&str; 3] = ["a", "b", "x"];
const INFIX: [&str; 7] = ["+", "-", "*", "/", "^", "<", "mod"];
/// Operators that stay finite on finite operands.
const TOTAL_INFIX: [&str; 3] = ["+", "-", "*"];
const FUNCTIONS: [&str; 5] = ["sin", "neg", "sqr", "abs", "atan"];

fn expression_text() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![
    (0u8..10).prop_map(|n| n.to_string()),
    prop::sample::select(NAMES.to_vec()).prop_map(str::to_string),
  ];
  leaf.prop_recursive(4, 32, 2, |inner| {
    prop_oneof![
      (
        inner.clone(),
        prop::sample::select(INFIX.to_vec()),
        inner.clone()
      )
        .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
      (prop::sample::select(FUNCTIONS.to_vec()), inner.clone())
        .prop_map(|(f, x)| format!("{f}({x})")),
      (inner.clone(), inner.clone())
        .prop_map(|(l, r)| format!("max({l}, {r})")),
      inner.prop_map(|x| format!("-{x}")),
    ]
  })
}

/// Random formula built from the same vocabulary, for seeded runs.
fn random_text(rng: &mut StdRng, depth: u32, infix: &[&str]) -> String {
  if depth == 0 || rng.gen_bool(0.25) {
    return if rng.gen_bool(0.5) {
      format!("{}", rng.gen_range(0..10))
    } else {
      NAMES[rng.gen_range(0..NAMES.len())].to_string()
    };
  }
  match rng.gen_range(0..4) {
    0 => {
      let op = infix[rng.gen_range(0..infix.len())];
      let l = random_text(rng, depth - 1, infix);
      let r = random_text(rng, depth - 1, infix);
      format!("{l} {op} {r}")
    }
    1 => {
      let f = FUNCTIONS[rng.gen_range(0..FUNCTIONS.len())];
      format!("{f}({})", random_text(rng, depth - 1, infix))
    }
    2 => format!(
      "min({}, {})",
      random_text(rng, depth - 1, infix),
      random_text(rng, depth - 1, infix)
    ),
    _ => format!("({})", random_text(rng, depth - 1, infix)),
  }
}

fn same_value(a: f64, b: f64) -> bool {
  a == b || (a.is_nan() && b.is_nan())
}

proptest! {
  #[test]
  fn simplify_is_idempotent(text in expression_text()) {
    let lexicon = Lexicon::new();
    let once = Expression::parse(&lexicon, &text).simplify();
    let twice = once.simplify();
    prop_assert!(!once.has_errors());
    prop_assert_eq!(once.to_string(), twice.to_string());
  }

  #[test]
  fn rendering_parses_back_to_the_same_tree(text in expression_text()) {
    let lexicon = Lexicon::new();
    let e = Expression::parse(&lexicon, &text);
    let again = Expression::parse(&lexicon, &e.to_string());
    prop_assert_eq!(e.root(), again.root());
  }
}

#[test]
fn render_round_trip_with_random_bindings() {
  let mut rng = StdRng::seed_from_u64(0x5eed);
  for _ in 0..200 {
    let lexicon = Lexicon::new();
    let text = random_text(&mut rng, 5, &INFIX);
    let e = Expression::parse(&lexicon, &text);
    assert!(!e.has_errors(), "{text}: {:?}", e.errors());
    for name in NAMES {
      lexicon.assign(name, rng.gen_range(-5.0..5.0)).unwrap();
    }
    let rendered = e.to_string();
    let again = Expression::parse(&lexicon, &rendered);
    let (before, after) = (e.to_number(), again.to_number());
    assert!(
      same_value(before, after),
      "{text} -> {rendered}: {before} != {after}"
    );
  }
}

#[test]
fn simplify_and_distribute_preserve_values() {
  let mut rng = StdRng::seed_from_u64(7);
  for _ in 0..200 {
    let lexicon = Lexicon::new();
    // Depth 3 keeps every intermediate below 9^8
    let text = random_text(&mut rng, 3, &TOTAL_INFIX);
    let e = Expression::parse(&lexicon, &text);
    for name in NAMES {
      lexicon.assign(name, rng.gen_range(0.5..3.0)).unwrap();
    }
    let value = e.to_number();
    let simplified = e.simplify().to_number();
    let distributed = e.distribute().to_number();
    let tolerance = 1e-6 * (1.0 + value.abs());
    assert_eq!(simplified, value, "{text}");
    assert!((distributed - value).abs() <= tolerance, "{text}");
  }
}
