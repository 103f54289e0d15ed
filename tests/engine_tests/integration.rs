use super::*;
use symexpr::{
  AdaptiveOptions, IntegrationError, adaptive_simpson, simpson,
  simpson_piecewise, trapezoid,
};

#[test]
fn simpson_exact_for_cubics() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "4*x^3 + 3*x^2 - 2*x + 1");
  // x^4 + x^3 - x^2 + x over [0, 2] = 16 + 8 - 4 + 2
  for intervals in [2, 4, 16] {
    let area = simpson(&f, "x", 0.0, 2.0, intervals).unwrap();
    assert!((area - 22.0).abs() < 1e-12, "{intervals} intervals: {area}");
  }
}

#[test]
fn trapezoid_sample_points() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "x^2");
  // Three points on [0, 2]: h = 1, 1 * (0/2 + 1 + 4/2)
  assert_eq!(trapezoid(&f, "x", 0.0, 2.0, 3).unwrap(), 3.0);
}

#[test]
fn rules_agree_on_smooth_integrands() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "exp(-x) * cos(x)");
  let (a, b) = (0.0, 2.0);
  let exact = {
    let antiderivative = |x: f64| (-x).exp() * (x.sin() - x.cos()) / 2.0;
    antiderivative(b) - antiderivative(a)
  };
  let adaptive =
    adaptive_simpson(&f, "x", a, b, &AdaptiveOptions::default()).unwrap();
  assert!((adaptive - exact).abs() < 1e-9);
  assert!((simpson(&f, "x", a, b, 200).unwrap() - exact).abs() < 1e-8);
  assert!((trapezoid(&f, "x", a, b, 2001).unwrap() - exact).abs() < 1e-6);
}

#[test]
fn piecewise_follows_the_breakpoints() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "max(x, 0) * w");
  lexicon.assign("w", 2.0).unwrap();
  let parts = simpson_piecewise(&f, "x", &[-1.0, 0.0, 1.0, 2.0], 2).unwrap();
  assert_eq!(parts.len(), 3);
  assert!(parts[0].abs() < 1e-12);
  assert!((parts[1] - 1.0).abs() < 1e-12);
  assert!((parts[2] - 3.0).abs() < 1e-12);
}

#[test]
fn invalid_requests() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "x + q");
  assert_eq!(
    simpson(&f, "x", 0.0, 1.0, 5),
    Err(IntegrationError::OddIntervals(5))
  );
  assert_eq!(
    trapezoid(&f, "x", 0.0, 1.0, 0),
    Err(IntegrationError::TooFewSamples(0))
  );
  assert_eq!(
    trapezoid(&f, "x", 0.0, 1.0, 2),
    Err(IntegrationError::NotNumeric { at: 0.0 })
  );
  assert_eq!(
    simpson_piecewise(&f, "x", &[], 2),
    Err(IntegrationError::TooFewBreakpoints(0))
  );
}

#[test]
fn integrand_outside_its_domain() {
  let lexicon = Lexicon::new();
  let f = Expression::parse(&lexicon, "sqrt(x)");
  let options = AdaptiveOptions::default();
  let outside = |at| Err(IntegrationError::NotNumeric { at });
  assert_eq!(trapezoid(&f, "x", -1.0, 1.0, 101), outside(-1.0));
  assert_eq!(simpson(&f, "x", -1.0, 1.0, 4), outside(-0.5));
  assert_eq!(adaptive_simpson(&f, "x", -1.0, 1.0, &options), outside(-1.0));
  assert_eq!(
    simpson_piecewise(&f, "x", &[-1.0, 0.0, 1.0], 2),
    Err(IntegrationError::NotNumeric { at: -0.5 })
  );
  // Still fine where the root is real
  let area = adaptive_simpson(&f, "x", 0.0, 1.0, &options).unwrap();
  assert!((area - 2.0 / 3.0).abs() < 1e-6);
}

#[test]
fn integrand_through_a_named_expression() {
  let lexicon = Lexicon::new();
  lexicon.bind_all("u = x^2").unwrap();
  let f = Expression::parse(&lexicon, "u");
  let area = simpson(&f, "x", 0.0, 1.0, 10).unwrap();
  assert!((area - 1.0 / 3.0).abs() < 1e-12);
  assert_eq!(
    simpson(&f, "x", 0.0, 1.0, 1),
    Err(IntegrationError::OddIntervals(1))
  );
}
