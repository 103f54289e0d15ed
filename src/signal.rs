//! Tokens and tree payloads shared by every stage of the pipeline.

use crate::algebra::format_number;
use crate::lexicon::{Lexicon, Literal, Variable};
use crate::operators::{BinaryOp, Position, UnaryOp};

/// Precedence of literal and variable operands.
pub const OPERAND_PRECEDENCE: i32 = 8;
/// Precedence reported by parentheses and separators.
pub const GROUPING_PRECEDENCE: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
  Literal(Literal),
  Variable(Variable),
  Unary(UnaryOp),
  Binary(BinaryOp),
  LeftParen,
  RightParen,
  /// Separates the two arguments of a call-style operator.
  Comma,
  End,
}

impl Signal {
  pub fn precedence(&self) -> i32 {
    match self {
      Signal::Literal(_) | Signal::Variable(_) => OPERAND_PRECEDENCE,
      Signal::Unary(op) => op.precedence(),
      Signal::Binary(op) => op.precedence(),
      Signal::LeftParen | Signal::RightParen | Signal::Comma | Signal::End => {
        GROUPING_PRECEDENCE
      }
    }
  }

  pub fn position(&self) -> Option<Position> {
    match self {
      Signal::Unary(_) => Some(Position::Prefix),
      Signal::Binary(op) => Some(op.position()),
      _ => None,
    }
  }

  pub fn is_operator(&self) -> bool {
    matches!(self, Signal::Unary(_) | Signal::Binary(_))
  }

  /// Whether the signal has a meaningful value by itself. Operators never
  /// do; variables only while bound.
  pub fn is_evaluable(&self, lexicon: &Lexicon) -> bool {
    match self {
      Signal::Literal(_) => true,
      Signal::Variable(variable) => {
        lexicon.variable_value(variable, &mut Vec::new()).is_some()
      }
      _ => false,
    }
  }

  pub fn name(&self, lexicon: &Lexicon) -> String {
    match self {
      Signal::Literal(literal) => format_number(literal.value()),
      Signal::Variable(variable) => lexicon.name_of(variable),
      Signal::Unary(op) => op.name().to_string(),
      Signal::Binary(op) => op.to_string(),
      Signal::LeftParen => "(".to_string(),
      Signal::RightParen => ")".to_string(),
      Signal::Comma => ",".to_string(),
      Signal::End => "<end>".to_string(),
    }
  }
}
