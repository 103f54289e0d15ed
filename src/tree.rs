//! Expression tree.
//!
//! A `Branch` owns its children, so cloning a tree copies it deeply and two
//! expressions never share nodes. Leaves hold literal handles (which keep
//! the pool's reference count) and variable keys resolved through the
//! lexicon.

use crate::lexicon::{Lexicon, Literal, Variable};
use crate::operators::{BinaryOp, UnaryOp};
use crate::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub enum Branch {
  Literal(Literal),
  Variable(Variable),
  Unary {
    op: UnaryOp,
    operand: Box<Branch>,
  },
  Binary {
    op: BinaryOp,
    left: Box<Branch>,
    right: Box<Branch>,
  },
}

impl Branch {
  pub fn number(lexicon: &Lexicon, value: f64) -> Self {
    Branch::Literal(lexicon.intern(value))
  }

  pub fn unary(op: UnaryOp, operand: Branch) -> Self {
    Branch::Unary {
      op,
      operand: Box::new(operand),
    }
  }

  pub fn binary(op: BinaryOp, left: Branch, right: Branch) -> Self {
    Branch::Binary {
      op,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn signal(&self) -> Signal {
    match self {
      Branch::Literal(literal) => Signal::Literal(literal.clone()),
      Branch::Variable(variable) => Signal::Variable(*variable),
      Branch::Unary { op, .. } => Signal::Unary(*op),
      Branch::Binary { op, .. } => Signal::Binary(*op),
    }
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self, Branch::Literal(_) | Branch::Variable(_))
  }

  /// True for a literal leaf holding exactly `value`.
  pub fn is_number(&self, value: f64) -> bool {
    matches!(self, Branch::Literal(literal) if literal.value() == value)
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Branch::Literal(literal) => Some(literal.value()),
      _ => None,
    }
  }

  /// Evaluable when every variable below is bound.
  pub fn is_evaluable(&self, lexicon: &Lexicon) -> bool {
    self.value(lexicon).is_some()
  }

  /// Numeric value of the whole tree, `None` while something is unbound.
  pub fn value(&self, lexicon: &Lexicon) -> Option<f64> {
    self.value_in(lexicon, &mut Vec::new())
  }

  pub(crate) fn value_in(
    &self,
    lexicon: &Lexicon,
    active: &mut Vec<Variable>,
  ) -> Option<f64> {
    match self {
      Branch::Literal(literal) => Some(literal.value()),
      Branch::Variable(variable) => lexicon.variable_value(variable, active),
      Branch::Unary { op, operand } => {
        operand.value_in(lexicon, active).map(|x| op.evaluate(x))
      }
      Branch::Binary { op, left, right } => {
        let a = left.value_in(lexicon, active)?;
        let b = right.value_in(lexicon, active)?;
        Some(op.evaluate(a, b))
      }
    }
  }

  pub fn depends_on(&self, variable: &Variable) -> bool {
    match self {
      Branch::Literal(_) => false,
      Branch::Variable(v) => v == variable,
      Branch::Unary { operand, .. } => operand.depends_on(variable),
      Branch::Binary { left, right, .. } => {
        left.depends_on(variable) || right.depends_on(variable)
      }
    }
  }

  /// Distinct variables in order of first appearance, left to right.
  pub fn variables(&self) -> Vec<Variable> {
    let mut found = Vec::new();
    self.collect_variables(&mut found);
    found
  }

  fn collect_variables(&self, found: &mut Vec<Variable>) {
    match self {
      Branch::Literal(_) => {}
      Branch::Variable(v) => {
        if !found.contains(v) {
          found.push(*v);
        }
      }
      Branch::Unary { operand, .. } => operand.collect_variables(found),
      Branch::Binary { left, right, .. } => {
        left.collect_variables(found);
        right.collect_variables(found);
      }
    }
  }

  /// Variables below that are not currently evaluable.
  pub fn free_variables(&self, lexicon: &Lexicon) -> Vec<Variable> {
    self
      .variables()
      .into_iter()
      .filter(|v| lexicon.variable_value(v, &mut Vec::new()).is_none())
      .collect()
  }

  pub fn node_count(&self) -> usize {
    match self {
      Branch::Literal(_) | Branch::Variable(_) => 1,
      Branch::Unary { operand, .. } => 1 + operand.node_count(),
      Branch::Binary { left, right, .. } => {
        1 + left.node_count() + right.node_count()
      }
    }
  }

  /// Replaces every occurrence of `variable` with a copy of `replacement`.
  ///
  /// Matching is by variable identity. A root that is the variable itself
  /// is replaced wholesale; the copies are never searched again, so a
  /// replacement may mention the variable it replaces.
  pub fn substitute(&mut self, variable: &Variable, replacement: &Branch) {
    if matches!(self, Branch::Variable(v) if v == variable) {
      *self = replacement.clone();
      return;
    }
    match self {
      Branch::Literal(_) | Branch::Variable(_) => {}
      Branch::Unary { operand, .. } => {
        operand.substitute(variable, replacement)
      }
      Branch::Binary { left, right, .. } => {
        left.substitute(variable, replacement);
        right.substitute(variable, replacement);
      }
    }
  }
}
