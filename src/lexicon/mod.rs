//! The vocabulary every parsing and evaluation stage consults: the literal
//! pool, the variable table and the operator catalogue.
//!
//! A `Lexicon` is a cheap, cloneable handle. Clones share the same tables,
//! so an expression can carry its lexicon around while the caller keeps
//! assigning variables through another clone. The handle is not `Send`;
//! use one lexicon per thread.

pub mod literal;
pub mod variable;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use literal::{Literal, LiteralPool};
pub use variable::{Binding, Variable, VariableTable};

use crate::expression::Expression;
use crate::signal::Signal;
use crate::{ExprError, operators};

static NEXT_LEXICON_ID: AtomicU64 = AtomicU64::new(1);

struct Tables {
  id: u64,
  literals: RefCell<LiteralPool>,
  variables: RefCell<VariableTable>,
}

#[derive(Clone)]
pub struct Lexicon {
  tables: Rc<Tables>,
}

impl Default for Lexicon {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Lexicon {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Lexicon")
      .field("id", &self.tables.id)
      .field("literals", &self.literal_count())
      .field("variables", &self.tables.variables.borrow().len())
      .finish()
  }
}

impl Lexicon {
  pub fn new() -> Self {
    Self {
      tables: Rc::new(Tables {
        id: NEXT_LEXICON_ID.fetch_add(1, Ordering::Relaxed),
        literals: RefCell::new(LiteralPool::default()),
        variables: RefCell::new(VariableTable::default()),
      }),
    }
  }

  pub fn id(&self) -> u64 {
    self.tables.id
  }

  /// Whether both handles share the same tables.
  pub fn same(&self, other: &Lexicon) -> bool {
    Rc::ptr_eq(&self.tables, &other.tables)
  }

  // ─── Literals ──────────────────────────────────────────────────────

  pub fn intern(&self, value: f64) -> Literal {
    self.tables.literals.borrow_mut().intern(value)
  }

  /// Gives back a signal obtained from this lexicon. Only literals are
  /// counted; anything else is ignored.
  pub fn release(&self, signal: Signal) {
    if let Signal::Literal(literal) = signal {
      self.tables.literals.borrow_mut().release(literal);
    }
  }

  pub fn ref_count(&self, value: f64) -> usize {
    self.tables.literals.borrow().ref_count(value)
  }

  pub fn literal_count(&self) -> usize {
    self.tables.literals.borrow().len()
  }

  pub fn sweep(&self) -> usize {
    self.tables.literals.borrow_mut().sweep()
  }

  // ─── Names ─────────────────────────────────────────────────────────

  /// Resolves a name to a built-in operator or an already declared
  /// variable.
  pub fn lookup(&self, name: &str) -> Option<Signal> {
    operators::lookup(name)
      .or_else(|| self.variable(name).map(Signal::Variable))
  }

  pub fn declare_variable(&self, name: &str) -> Variable {
    let symbol = self.tables.variables.borrow_mut().declare(name);
    Variable {
      lexicon: self.id(),
      symbol,
    }
  }

  pub fn variable(&self, name: &str) -> Option<Variable> {
    let symbol = self.tables.variables.borrow().find(name)?;
    Some(Variable {
      lexicon: self.id(),
      symbol,
    })
  }

  pub fn owns(&self, variable: &Variable) -> bool {
    variable.lexicon == self.id()
  }

  pub fn name_of(&self, variable: &Variable) -> String {
    if !self.owns(variable) {
      return format!("<foreign#{}>", variable.lexicon);
    }
    self
      .tables
      .variables
      .borrow()
      .name(variable.symbol)
      .unwrap_or("?")
      .to_string()
  }

  pub fn variable_names(&self) -> Vec<String> {
    self
      .tables
      .variables
      .borrow()
      .names()
      .map(str::to_string)
      .collect()
  }

  // ─── Bindings ──────────────────────────────────────────────────────

  pub fn binding(&self, variable: &Variable) -> Binding {
    if !self.owns(variable) {
      return Binding::Unbound;
    }
    self
      .tables
      .variables
      .borrow()
      .binding(variable.symbol)
      .cloned()
      .unwrap_or_default()
  }

  pub fn assign(&self, name: &str, value: f64) -> Result<Variable, ExprError> {
    self.bind(name, Binding::Value(value))
  }

  /// Forgets the value of `name` but keeps the variable declared.
  pub fn unassign(&self, name: &str) {
    if let Some(variable) = self.variable(name) {
      self
        .tables
        .variables
        .borrow_mut()
        .set(variable.symbol, Binding::Unbound);
    }
  }

  /// Turns `name` into a named-expression variable.
  pub fn define(
    &self,
    name: &str,
    definition: &Expression,
  ) -> Result<Variable, ExprError> {
    if !self.same(definition.lexicon()) {
      return Err(ExprError::ForeignLexicon);
    }
    if let Some(error) = definition.errors().first() {
      return Err(error.clone());
    }
    let tree = definition.root().cloned().ok_or(ExprError::Empty)?;
    self.bind(name, Binding::Expression(tree))
  }

  fn bind(&self, name: &str, binding: Binding) -> Result<Variable, ExprError> {
    if operators::lookup(name).is_some() {
      return Err(ExprError::ReservedName(name.to_string()));
    }
    let variable = self.declare_variable(name);
    self
      .tables
      .variables
      .borrow_mut()
      .set(variable.symbol, binding);
    Ok(variable)
  }

  /// Current numeric value of `name`, following named expressions.
  pub fn value_of(&self, name: &str) -> Option<f64> {
    let variable = self.variable(name)?;
    self.variable_value(&variable, &mut Vec::new())
  }

  pub(crate) fn variable_value(
    &self,
    variable: &Variable,
    active: &mut Vec<Variable>,
  ) -> Option<f64> {
    match self.binding(variable) {
      Binding::Unbound => None,
      Binding::Value(value) => Some(value),
      Binding::Expression(definition) => {
        if active.contains(variable) {
          tracing::warn!(
            variable = %self.name_of(variable),
            "named expression refers to itself; left unevaluated"
          );
          return None;
        }
        active.push(*variable);
        let value = definition.value_in(self, active);
        active.pop();
        value
      }
    }
  }
}
