//! Newton's method on a single variable.

use crate::ExprError;
use crate::expression::Expression;
use crate::operators::BinaryOp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
  /// Stop once a step is smaller than this.
  pub tolerance: f64,
  pub max_iterations: usize,
}

impl Default for NewtonOptions {
  fn default() -> Self {
    Self {
      tolerance: 1e-9,
      max_iterations: 100,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRoot {
  pub root: f64,
  /// f(root)
  pub residual: f64,
  /// Size of the last step taken.
  pub step: f64,
  pub iterations: usize,
  pub converged: bool,
}

impl Expression {
  /// Searches a root of `self` in the variable `name`, starting at `x0`.
  ///
  /// The Newton quotient `f / f'` is built symbolically once and then
  /// evaluated at every iterate. Running out of iterations, or reaching a
  /// point where the quotient has no finite value, ends the search with
  /// `converged == false`.
  pub fn newton_root(
    &self,
    options: &NewtonOptions,
    name: &str,
    x0: f64,
  ) -> Result<NewtonRoot, ExprError> {
    if let Some(error) = self.errors().first() {
      return Err(error.clone());
    }
    let derivative = self.differentiate(name).simplify();
    let quotient = Expression::combine(BinaryOp::Div, self, &derivative);
    tracing::debug!(%derivative, %quotient, "newton setup");

    let mut x = x0;
    let mut step = f64::NAN;
    let mut iterations = 0;
    let mut converged = false;
    while iterations < options.max_iterations {
      iterations += 1;
      if self.eval_at(name, x).try_number() == Ok(0.0) {
        step = 0.0;
        converged = true;
        break;
      }
      match quotient.eval_at(name, x).try_number() {
        Ok(q) if q.is_finite() => {
          x -= q;
          step = q.abs();
          tracing::trace!(iteration = iterations, x, step, "newton step");
          if step < options.tolerance {
            converged = true;
            break;
          }
        }
        Ok(q) => {
          tracing::warn!(x, quotient = q, "newton quotient is not finite");
          break;
        }
        Err(error) => {
          tracing::warn!(x, %error, "newton quotient is not numeric");
          break;
        }
      }
    }
    if !converged {
      tracing::warn!(x, iterations, "newton iteration did not converge");
    }
    let residual = self.eval_at(name, x).try_number().unwrap_or(f64::NAN);
    Ok(NewtonRoot {
      root: x,
      residual,
      step,
      iterations,
      converged,
    })
  }
}
