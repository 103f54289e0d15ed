//! Built-in operator catalogue.
//!
//! Every operator is a plain enum value with a fixed name, precedence and
//! position. The numeric rule lives in `evaluate`; the symbolic rules
//! (`simplify`, `distribute`, `differentiate`) build new branches and are
//! driven bottom-up by the tree algebra in `crate::algebra`.

pub mod binary;
pub mod unary;

pub use binary::BinaryOp;
pub use unary::UnaryOp;

use crate::signal::Signal;
use crate::tree::Branch;

/// Operator precedence levels, lowest binds loosest.
pub mod precedence {
  pub const OR: i32 = 1;
  pub const AND: i32 = 2;
  pub const COMPARISON: i32 = 3;
  pub const ADDITIVE: i32 = 4;
  pub const MULTIPLICATIVE: i32 = 5;
  pub const UNARY: i32 = 6;
}

/// Where an operator sits relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
  /// `sin(x)`, `-x`, `max(a,b)`
  Prefix,
  /// `a + b`, `a div b`
  Infix,
}

/// Resolves a name against the fixed catalogue.
pub fn lookup(name: &str) -> Option<Signal> {
  if let Some(op) = UnaryOp::from_name(name) {
    return Some(Signal::Unary(op));
  }
  BinaryOp::from_name(name).map(Signal::Binary)
}

/// Names of every built-in operator, Macaulay brackets shown as `FmacN`.
pub fn catalogue() -> Vec<String> {
  let mut names: Vec<String> =
    BinaryOp::FIXED.iter().map(|op| op.to_string()).collect();
  names.push("FmacN".to_string());
  names.extend(UnaryOp::ALL.iter().map(|op| op.name().to_string()));
  names
}

pub(crate) fn truth(b: bool) -> f64 {
  if b { 1.0 } else { 0.0 }
}

pub(crate) fn is_true(x: f64) -> bool {
  x != 0.0
}

/// A child of the node being differentiated, with its derivative.
pub struct Differentiated<'a> {
  pub branch: &'a Branch,
  pub derivative: Branch,
  /// Whether `branch` mentions the variable at all.
  pub varies: bool,
}
