use thiserror::Error;

mod algebra;
pub mod bindings;
pub mod expression;
pub mod integration;
pub mod lexicon;
pub mod operators;
pub mod parser;
pub mod signal;
pub mod solve;
pub mod tree;

pub use algebra::format_number;
pub use bindings::{Assignment, parse_assignments};
pub use expression::Expression;
pub use integration::{
  AdaptiveOptions, adaptive_simpson, simpson, simpson_piecewise, trapezoid,
};
pub use lexicon::{Binding, Lexicon, Literal, Variable};
pub use operators::{BinaryOp, UnaryOp};
pub use signal::Signal;
pub use solve::{NewtonOptions, NewtonRoot};
pub use tree::Branch;

/// Problems found while turning text into a tree. Offsets are byte
/// positions in the source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
  #[error("operator `{operator}` at byte {offset} has no left operand")]
  IllegalOperator { offset: usize, operator: String },
  #[error("missing operator before byte {offset}")]
  MissingOperator { offset: usize },
  #[error("unmatched parenthesis at byte {offset}")]
  UnmatchedParen { offset: usize },
  #[error("unknown symbol `{symbol}` at byte {offset}")]
  UnknownSymbol { offset: usize, symbol: String },
  #[error("invalid number `{text}` at byte {offset}")]
  InvalidNumber { offset: usize, text: String },
  #[error("comma outside of an argument list at byte {offset}")]
  MisplacedComma { offset: usize },
  #[error("`{name}` at byte {offset} takes 2 arguments, found {found}")]
  CallArity {
    offset: usize,
    name: String,
    found: usize,
  },
  #[error("`{name}` at byte {offset} must be followed by `(`")]
  MissingArguments { offset: usize, name: String },
  #[error("operand expected at byte {offset}")]
  Truncated { offset: usize },
  #[error("Empty input")]
  Empty,
  #[error("malformed expression, {remaining} operands left on the stack")]
  Malformed { remaining: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
  #[error("Parse error: {0}")]
  Translation(#[from] TranslationError),
  #[error("not evaluable, free variables: {}", .free.join(", "))]
  NotEvaluable { free: Vec<String> },
  #[error("expressions belong to different lexicons")]
  ForeignLexicon,
  #[error("`{0}` is a built-in operator and cannot be bound")]
  ReservedName(String),
  #[error("expression has no tree")]
  Empty,
  #[error("invalid binding `{text}`: {reason}")]
  Binding { text: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
  #[error("at least 2 samples are needed, got {0}")]
  TooFewSamples(usize),
  #[error("Simpson's rule needs an even number of intervals, got {0}")]
  OddIntervals(usize),
  #[error("integrand is not numeric at {at}")]
  NotNumeric { at: f64 },
  #[error("at least 2 breakpoints are needed, got {0}")]
  TooFewBreakpoints(usize),
}

/// Parses `text` in a fresh lexicon, applies `bindings` (`"a=1,b=a+2"`)
/// and returns the numeric value.
///
/// ```
/// assert_eq!(symexpr::evaluate("r*2 + 1", "r=3").unwrap(), 7.0);
/// ```
pub fn evaluate(text: &str, bindings: &str) -> Result<f64, ExprError> {
  let lexicon = Lexicon::new();
  if !bindings.trim().is_empty() {
    lexicon.bind_all(bindings)?;
  }
  Expression::parse(&lexicon, text).try_number()
}
