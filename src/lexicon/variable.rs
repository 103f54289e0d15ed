use rustc_hash::FxHashMap;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

use crate::tree::Branch;

/// A named slot declared in a `Lexicon`.
///
/// Variables are keys, not storage: the value lives in the lexicon's table
/// and is looked up when a tree is evaluated. Identity is the pair of
/// owning lexicon and interned name, so equally named variables of two
/// different lexicons never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
  pub(crate) lexicon: u64,
  pub(crate) symbol: DefaultSymbol,
}

/// What a variable currently stands for.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Binding {
  /// Declared but not assigned.
  #[default]
  Unbound,
  Value(f64),
  /// Named expression; evaluable when the definition is.
  Expression(Branch),
}

impl Binding {
  pub fn is_assigned(&self) -> bool {
    !matches!(self, Binding::Unbound)
  }
}

#[derive(Debug, Default)]
pub struct VariableTable {
  names: StringInterner<DefaultBackend>,
  bindings: FxHashMap<DefaultSymbol, Binding>,
}

impl VariableTable {
  pub fn declare(&mut self, name: &str) -> DefaultSymbol {
    let symbol = self.names.get_or_intern(name);
    self.bindings.entry(symbol).or_default();
    symbol
  }

  pub fn find(&self, name: &str) -> Option<DefaultSymbol> {
    self.names.get(name)
  }

  pub fn name(&self, symbol: DefaultSymbol) -> Option<&str> {
    self.names.resolve(symbol)
  }

  pub fn binding(&self, symbol: DefaultSymbol) -> Option<&Binding> {
    self.bindings.get(&symbol)
  }

  pub fn set(&mut self, symbol: DefaultSymbol, binding: Binding) {
    self.bindings.insert(symbol, binding);
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  /// Declared names in declaration order.
  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.names.iter().map(|(_, name)| name)
  }
}
