//! The user-facing value type.
//!
//! An `Expression` owns a tree and the lexicon it was built in. Every
//! transform returns a new expression; the receiver is left untouched.
//! Translation problems are kept on the expression and travel with it
//! through every later operation, so a chain like
//! `parse(..).simplify().differentiate("x")` never panics and the first
//! error surfaces when a number is finally asked for.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::bindings::parse_assignments;
use crate::lexicon::Lexicon;
use crate::operators::{BinaryOp, UnaryOp};
use crate::parser;
use crate::tree::Branch;
use crate::ExprError;

#[derive(Clone)]
pub struct Expression {
  lexicon: Lexicon,
  root: Option<Branch>,
  errors: Vec<ExprError>,
}

impl Expression {
  // ─── Construction ──────────────────────────────────────────────────

  /// Parses infix text. Unknown identifiers are declared as variables in
  /// `lexicon`.
  pub fn parse(lexicon: &Lexicon, text: &str) -> Self {
    let parsed = parser::parse(text, lexicon);
    Self {
      lexicon: lexicon.clone(),
      root: parsed.tree,
      errors: parsed.errors.into_iter().map(ExprError::from).collect(),
    }
  }

  pub fn number(lexicon: &Lexicon, value: f64) -> Self {
    Self::from_branch(lexicon, Branch::number(lexicon, value))
  }

  pub fn from_branch(lexicon: &Lexicon, root: Branch) -> Self {
    Self {
      lexicon: lexicon.clone(),
      root: Some(root),
      errors: Vec::new(),
    }
  }

  /// `left op right`, with copies of both trees.
  ///
  /// Operands from another lexicon are kept as they are (their variables
  /// stay distinct from same-named ones here) and the result carries
  /// `ExprError::ForeignLexicon`.
  pub fn combine(op: BinaryOp, left: &Expression, right: &Expression) -> Self {
    let mut errors = left.errors.clone();
    errors.extend(right.errors.iter().cloned());
    if !left.lexicon.same(&right.lexicon) {
      tracing::warn!(
        left = left.lexicon.id(),
        right = right.lexicon.id(),
        "combining expressions from different lexicons"
      );
      errors.push(ExprError::ForeignLexicon);
    }
    let root = match (&left.root, &right.root) {
      (Some(l), Some(r)) => Some(Branch::binary(op, l.clone(), r.clone())),
      _ => None,
    };
    Self {
      lexicon: left.lexicon.clone(),
      root,
      errors,
    }
  }

  pub fn apply(op: UnaryOp, operand: &Expression) -> Self {
    operand.map(|root, _| Branch::unary(op, root))
  }

  fn map(&self, f: impl FnOnce(Branch, &Lexicon) -> Branch) -> Self {
    Self {
      lexicon: self.lexicon.clone(),
      root: self.root.clone().map(|root| f(root, &self.lexicon)),
      errors: self.errors.clone(),
    }
  }

  fn with_error(mut self, error: ExprError) -> Self {
    self.errors.push(error);
    self
  }

  // ─── Accessors ─────────────────────────────────────────────────────

  pub fn lexicon(&self) -> &Lexicon {
    &self.lexicon
  }

  pub fn root(&self) -> Option<&Branch> {
    self.root.as_ref()
  }

  pub fn errors(&self) -> &[ExprError] {
    &self.errors
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  pub fn is_evaluable(&self) -> bool {
    !self.has_errors()
      && self
        .root
        .as_ref()
        .is_some_and(|root| root.is_evaluable(&self.lexicon))
  }

  /// Names of the variables that still keep the expression from being a
  /// number, in order of appearance.
  pub fn free_variables(&self) -> Vec<String> {
    let Some(root) = &self.root else {
      return Vec::new();
    };
    root
      .free_variables(&self.lexicon)
      .iter()
      .map(|variable| self.lexicon.name_of(variable))
      .collect()
  }

  // ─── Evaluation ────────────────────────────────────────────────────

  /// Folded copy: every evaluable subtree becomes a literal.
  pub fn eval(&self) -> Self {
    let mut folded = self.clone();
    folded.fold();
    folded
  }

  pub fn fold(&mut self) {
    if let Some(root) = &mut self.root {
      root.fold(&self.lexicon);
    }
  }

  /// Numeric value, or NaN when the expression has errors or free
  /// variables. The reason is logged at warn level.
  pub fn to_number(&self) -> f64 {
    self.try_number().unwrap_or_else(|error| {
      tracing::warn!(expression = %self, %error, "expression is not a number");
      f64::NAN
    })
  }

  pub fn try_number(&self) -> Result<f64, ExprError> {
    if let Some(error) = self.errors.first() {
      return Err(error.clone());
    }
    let root = self.root.as_ref().ok_or(ExprError::Empty)?;
    root.value(&self.lexicon).ok_or_else(|| ExprError::NotEvaluable {
      free: self.free_variables(),
    })
  }

  /// Folded copy with `name` replaced by `value`.
  pub fn eval_at(&self, name: &str, value: f64) -> Self {
    self.eval_with(name, &Expression::number(&self.lexicon, value))
  }

  /// Folded copy with `name` replaced by `replacement`.
  pub fn eval_with(&self, name: &str, replacement: &Expression) -> Self {
    self.substitute(name, replacement).eval()
  }

  /// Copy with every occurrence of the variable `name` replaced by a copy
  /// of `replacement`. Named expressions whose definitions mention `name`
  /// are inlined first, so the replacement reaches through them. A name
  /// this lexicon has never seen leaves the tree as it is.
  pub fn substitute(&self, name: &str, replacement: &Expression) -> Self {
    let mut result = self.clone();
    result.errors.extend(replacement.errors.iter().cloned());
    if !self.lexicon.same(&replacement.lexicon) {
      return result.with_error(ExprError::ForeignLexicon);
    }
    let (Some(variable), Some(with)) =
      (self.lexicon.variable(name), &replacement.root)
    else {
      return result;
    };
    if let Some(root) = result.root.take() {
      let mut root = root.inline_mentioning(&variable, &self.lexicon);
      root.substitute(&variable, with);
      result.root = Some(root);
    }
    result
  }

  /// Applies `"a=1,b=x+2"` left to right and folds the result. A value
  /// may use names bound earlier in the same list.
  pub fn eval_bindings(&self, text: &str) -> Self {
    let assignments = match parse_assignments(&self.lexicon, text) {
      Ok(assignments) => assignments,
      Err(error) => return self.clone().with_error(error),
    };
    let mut result = self.clone();
    let mut applied: Vec<(String, Expression)> = Vec::new();
    for assignment in assignments {
      let value = applied
        .iter()
        .fold(assignment.value, |value, (name, earlier)| {
          value.substitute(name, earlier)
        });
      result = result.substitute(&assignment.name, &value);
      applied.push((assignment.name, value));
    }
    result.eval()
  }

  // ─── Algebra ───────────────────────────────────────────────────────

  pub fn simplify(&self) -> Self {
    self.map(|root, lexicon| root.simplify(lexicon))
  }

  pub fn distribute(&self) -> Self {
    self.map(|root, _| root.distribute())
  }

  /// Inlines named-expression definitions, then distributes.
  pub fn expand(&self) -> Self {
    self.map(|root, lexicon| root.inline_definitions(lexicon).distribute())
  }

  /// Unsimplified derivative with respect to `name`. Named expressions are
  /// inlined first so the derivative sees through them; a name this
  /// lexicon does not know yields `0`.
  pub fn differentiate(&self, name: &str) -> Self {
    let Some(variable) = self.lexicon.variable(name) else {
      return self.map(|_, lexicon| Branch::number(lexicon, 0.0));
    };
    self.map(|root, lexicon| {
      root
        .inline_definitions(lexicon)
        .differentiate(&variable, lexicon)
    })
  }
}

impl fmt::Display for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (&self.root, self.errors.first()) {
      (Some(root), _) => f.write_str(&root.render(&self.lexicon)),
      (None, Some(error)) => write!(f, "<invalid: {error}>"),
      (None, None) => f.write_str("<empty>"),
    }
  }
}

impl fmt::Debug for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Expression")
      .field("text", &self.to_string())
      .field("lexicon", &self.lexicon.id())
      .field("errors", &self.errors)
      .finish()
  }
}

/// Same lexicon, same tree shape and leaves, same errors.
impl PartialEq for Expression {
  fn eq(&self, other: &Self) -> bool {
    self.lexicon.same(&other.lexicon)
      && self.root == other.root
      && self.errors == other.errors
  }
}

macro_rules! binary_operator {
  ($trait:ident, $method:ident, $op:expr) => {
    impl $trait<&Expression> for &Expression {
      type Output = Expression;

      fn $method(self, rhs: &Expression) -> Expression {
        Expression::combine($op, self, rhs)
      }
    }

    impl $trait for Expression {
      type Output = Expression;

      fn $method(self, rhs: Expression) -> Expression {
        Expression::combine($op, &self, &rhs)
      }
    }
  };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);

impl Neg for &Expression {
  type Output = Expression;

  fn neg(self) -> Expression {
    Expression::apply(UnaryOp::Neg, self)
  }
}

impl Neg for Expression {
  type Output = Expression;

  fn neg(self) -> Expression {
    Expression::apply(UnaryOp::Neg, &self)
  }
}
