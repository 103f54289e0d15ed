//! Infix tokens to postfix order.

use super::tokenizer::Token;
use crate::TranslationError;
use crate::operators::Position;
use crate::signal::Signal;

/// Reorders `tokens` into postfix.
///
/// Call-style operators share one production with grouping: `max(a, b)`
/// leaves `a b max`, the same sequence as an infix `a max b` would.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Signal>, TranslationError> {
  let mut output = Vec::with_capacity(tokens.len());
  // Operators and open parentheses, with their offsets
  let mut stack: Vec<(Signal, usize)> = Vec::new();

  for Token { signal, offset } in tokens {
    match signal {
      Signal::Literal(_) | Signal::Variable(_) => output.push(signal),
      Signal::LeftParen | Signal::Unary(_) => stack.push((signal, offset)),
      Signal::Binary(op) if op.position() == Position::Prefix => {
        stack.push((signal, offset))
      }
      Signal::Binary(op) => {
        while let Some((top, _)) = stack.last() {
          if !top.is_operator() || top.precedence() < op.precedence() {
            break;
          }
          if let Some((top, _)) = stack.pop() {
            output.push(top);
          }
        }
        stack.push((signal, offset));
      }
      Signal::Comma => {
        pop_to_paren(&mut stack, &mut output)
          .ok_or(TranslationError::MisplacedComma { offset })?;
      }
      Signal::RightParen => {
        pop_to_paren(&mut stack, &mut output)
          .ok_or(TranslationError::UnmatchedParen { offset })?;
        stack.pop();
        let closes_call = stack.last().is_some_and(|(top, _)| {
          matches!(top, Signal::Binary(_))
            && top.position() == Some(Position::Prefix)
        });
        if closes_call {
          if let Some((call, _)) = stack.pop() {
            output.push(call);
          }
        }
      }
      Signal::End => break,
    }
  }

  while let Some((signal, offset)) = stack.pop() {
    if signal == Signal::LeftParen {
      return Err(TranslationError::UnmatchedParen { offset });
    }
    output.push(signal);
  }
  Ok(output)
}

/// Moves operators to the output until an open parenthesis is on top,
/// leaving it in place. `None` when the stack runs out first.
fn pop_to_paren(
  stack: &mut Vec<(Signal, usize)>,
  output: &mut Vec<Signal>,
) -> Option<()> {
  loop {
    match stack.last() {
      Some((Signal::LeftParen, _)) => return Some(()),
      Some(_) => {
        let (signal, _) = stack.pop()?;
        output.push(signal);
      }
      None => return None,
    }
  }
}
