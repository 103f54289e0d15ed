use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

/// Dead entries tolerated before `intern` sweeps the pool.
const SWEEP_EVERY: usize = 256;

#[derive(Debug)]
struct Constant {
  value: f64,
}

/// Handle to an interned numeric constant.
///
/// Handles are reference counted: every clone held by a tree node counts
/// as one reference, and two handles for the same bit pattern are always
/// the same object. Interning is keyed on the exact bits, so `0.1 + 0.2`
/// and `0.3` are different literals, as are `0.0` and `-0.0`.
#[derive(Debug, Clone)]
pub struct Literal(Rc<Constant>);

impl Literal {
  pub fn value(&self) -> f64 {
    self.0.value
  }

  /// Number of live handles to this constant.
  pub fn ref_count(&self) -> usize {
    Rc::strong_count(&self.0)
  }
}

impl PartialEq for Literal {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

/// Flyweight pool of numeric constants.
#[derive(Debug, Default)]
pub struct LiteralPool {
  entries: FxHashMap<u64, Weak<Constant>>,
  inserted: usize,
}

impl LiteralPool {
  pub fn intern(&mut self, value: f64) -> Literal {
    let key = value.to_bits();
    if let Some(constant) = self.entries.get(&key).and_then(Weak::upgrade) {
      return Literal(constant);
    }
    let constant = Rc::new(Constant { value });
    self.entries.insert(key, Rc::downgrade(&constant));
    self.inserted += 1;
    if self.inserted >= SWEEP_EVERY {
      self.sweep();
    }
    Literal(constant)
  }

  /// Gives back one handle, erasing the entry once nobody holds it.
  pub fn release(&mut self, literal: Literal) {
    let key = literal.value().to_bits();
    drop(literal);
    if self.entries.get(&key).is_some_and(|w| w.strong_count() == 0) {
      self.entries.remove(&key);
    }
  }

  pub fn ref_count(&self, value: f64) -> usize {
    self
      .entries
      .get(&value.to_bits())
      .map_or(0, Weak::strong_count)
  }

  /// Number of constants still referenced somewhere.
  pub fn len(&self) -> usize {
    self.entries.values().filter(|w| w.strong_count() > 0).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Drops entries whose last handle is gone; returns how many.
  pub fn sweep(&mut self) -> usize {
    let before = self.entries.len();
    self.entries.retain(|_, w| w.strong_count() > 0);
    self.inserted = 0;
    before - self.entries.len()
  }
}
