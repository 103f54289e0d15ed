//! `name=value` lists such as `"a=1,b=x+2"`.
//!
//! Entries are separated by commas outside parentheses, so
//! `"m=max(a,b),n=2"` holds two entries. The right-hand side of each entry
//! is a full expression.

use crate::expression::Expression;
use crate::lexicon::{Lexicon, Variable};
use crate::{ExprError, operators};

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
  pub name: String,
  pub value: Expression,
}

/// Splits and parses a binding list. Values are parsed in `lexicon`; the
/// first malformed entry aborts with `ExprError::Binding`.
pub fn parse_assignments(
  lexicon: &Lexicon,
  text: &str,
) -> Result<Vec<Assignment>, ExprError> {
  split_top_level(text)
    .into_iter()
    .map(str::trim)
    .filter(|entry| !entry.is_empty())
    .map(|entry| parse_entry(lexicon, entry))
    .collect()
}

fn parse_entry(
  lexicon: &Lexicon,
  entry: &str,
) -> Result<Assignment, ExprError> {
  let invalid = |reason: &str| ExprError::Binding {
    text: entry.to_string(),
    reason: reason.to_string(),
  };
  let split = find_assignment(entry).ok_or_else(|| invalid("missing `=`"))?;
  let name = entry[..split].trim();
  if !is_identifier(name) {
    return Err(invalid("left-hand side is not a name"));
  }
  if operators::lookup(name).is_some() {
    return Err(ExprError::ReservedName(name.to_string()));
  }
  let value = Expression::parse(lexicon, &entry[split + 1..]);
  if let Some(error) = value.errors().first() {
    return Err(invalid(&error.to_string()));
  }
  Ok(Assignment {
    name: name.to_string(),
    value,
  })
}

fn split_top_level(text: &str) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut depth = 0usize;
  let mut start = 0;
  for (i, c) in text.char_indices() {
    match c {
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      ',' if depth == 0 => {
        parts.push(&text[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  parts.push(&text[start..]);
  parts
}

/// Byte index of the `=` that separates name and value, skipping the
/// comparison operators `==`, `<=`, `>=` and `!=`.
fn find_assignment(entry: &str) -> Option<usize> {
  let bytes = entry.as_bytes();
  (0..bytes.len()).find(|&i| {
    let before = i.checked_sub(1).map(|p| bytes[p]);
    bytes[i] == b'='
      && !matches!(before, Some(b'<' | b'>' | b'!' | b'='))
      && bytes.get(i + 1) != Some(&b'=')
  })
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Lexicon {
  /// Binds every entry of `text` in order. A constant right-hand side is
  /// assigned its value. One that mentions any variable becomes a named
  /// expression, whatever the order of the entries, so it follows later
  /// changes to the variables it mentions.
  ///
  /// ```
  /// use symexpr::Lexicon;
  ///
  /// let lexicon = Lexicon::new();
  /// lexicon.bind_all("b=0.3, h=0.5, area=b*h").unwrap();
  /// assert_eq!(lexicon.value_of("area"), Some(0.3 * 0.5));
  /// ```
  pub fn bind_all(&self, text: &str) -> Result<Vec<Variable>, ExprError> {
    parse_assignments(self, text)?
      .into_iter()
      .map(|assignment| {
        let constant = assignment
          .value
          .root()
          .is_some_and(|root| root.variables().is_empty());
        match assignment.value.try_number() {
          Ok(value) if constant => self.assign(&assignment.name, value),
          _ => self.define(&assignment.name, &assignment.value),
        }
      })
      .collect()
  }
}
