//! Numeric quadrature over one variable of an expression.
//!
//! Every rule samples the integrand through `Expression::eval_at`, so the
//! other variables must already be bound in the lexicon. A sample that is
//! not a finite number stops the rule with `IntegrationError::NotNumeric`.

use crate::IntegrationError;
use crate::expression::Expression;

fn sample(f: &Expression, name: &str, x: f64) -> Result<f64, IntegrationError> {
  match f.eval_at(name, x).try_number() {
    Ok(y) if y.is_finite() => Ok(y),
    _ => Err(IntegrationError::NotNumeric { at: x }),
  }
}

/// Composite trapezoid rule over `samples` equally spaced points,
/// end points included.
pub fn trapezoid(
  f: &Expression,
  name: &str,
  a: f64,
  b: f64,
  samples: usize,
) -> Result<f64, IntegrationError> {
  if samples < 2 {
    return Err(IntegrationError::TooFewSamples(samples));
  }
  let h = (b - a) / (samples - 1) as f64;
  let mut sum = 0.5 * (sample(f, name, a)? + sample(f, name, b)?);
  for k in 1..samples - 1 {
    sum += sample(f, name, a + h * k as f64)?;
  }
  Ok(h * sum)
}

/// Composite Simpson rule over an even number of `intervals`.
pub fn simpson(
  f: &Expression,
  name: &str,
  a: f64,
  b: f64,
  intervals: usize,
) -> Result<f64, IntegrationError> {
  if intervals == 0 {
    return Err(IntegrationError::TooFewSamples(1));
  }
  if intervals % 2 != 0 {
    return Err(IntegrationError::OddIntervals(intervals));
  }
  let h = (b - a) / intervals as f64;
  let mut odd = 0.0;
  let mut even = 0.0;
  for k in 1..intervals {
    let y = sample(f, name, a + h * k as f64)?;
    if k % 2 == 1 {
      odd += y;
    } else {
      even += y;
    }
  }
  let ends = sample(f, name, a)? + sample(f, name, b)?;
  Ok(h / 3.0 * (ends + 4.0 * odd + 2.0 * even))
}

/// Simpson's rule on each span between consecutive `breaks`, one result
/// per span.
pub fn simpson_piecewise(
  f: &Expression,
  name: &str,
  breaks: &[f64],
  intervals: usize,
) -> Result<Vec<f64>, IntegrationError> {
  if breaks.len() < 2 {
    return Err(IntegrationError::TooFewBreakpoints(breaks.len()));
  }
  breaks
    .windows(2)
    .map(|span| simpson(f, name, span[0], span[1], intervals))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveOptions {
  pub tolerance: f64,
  pub max_depth: u32,
}

impl Default for AdaptiveOptions {
  fn default() -> Self {
    Self {
      tolerance: 1e-10,
      max_depth: 50,
    }
  }
}

/// Adaptive Simpson's quadrature
pub fn adaptive_simpson(
  f: &Expression,
  name: &str,
  a: f64,
  b: f64,
  options: &AdaptiveOptions,
) -> Result<f64, IntegrationError> {
  let eval = |x: f64| sample(f, name, x);
  let fa = eval(a)?;
  let fb = eval(b)?;
  let fm = eval((a + b) / 2.0)?;
  let panel = Panel {
    a,
    b,
    fa,
    fm,
    fb,
    whole: (b - a) / 6.0 * (fa + 4.0 * fm + fb),
  };
  adaptive_simpson_rec(&eval, panel, options.tolerance, options.max_depth)
}

/// One Simpson panel with its three samples already taken.
struct Panel {
  a: f64,
  b: f64,
  fa: f64,
  fm: f64,
  fb: f64,
  whole: f64,
}

fn adaptive_simpson_rec(
  f: &dyn Fn(f64) -> Result<f64, IntegrationError>,
  panel: Panel,
  tol: f64,
  depth: u32,
) -> Result<f64, IntegrationError> {
  let Panel {
    a,
    b,
    fa,
    fm,
    fb,
    whole,
  } = panel;
  let m = (a + b) / 2.0;
  let fm1 = f((a + m) / 2.0)?;
  let fm2 = f((m + b) / 2.0)?;
  let h = b - a;
  let left = h / 12.0 * (fa + 4.0 * fm1 + fm);
  let right = h / 12.0 * (fm + 4.0 * fm2 + fb);
  let refined = left + right;
  let error = (refined - whole) / 15.0;

  if depth == 0 || !error.is_finite() || error.abs() < tol {
    return Ok(refined + error);
  }
  let left_panel = Panel {
    a,
    b: m,
    fa,
    fm: fm1,
    fb: fm,
    whole: left,
  };
  let right_panel = Panel {
    a: m,
    b,
    fa: fm,
    fm: fm2,
    fb,
    whole: right,
  };
  Ok(
    adaptive_simpson_rec(f, left_panel, tol / 2.0, depth - 1)?
      + adaptive_simpson_rec(f, right_panel, tol / 2.0, depth - 1)?,
  )
}
