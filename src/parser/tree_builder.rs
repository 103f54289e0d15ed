//! Postfix signals to a single tree.

use crate::TranslationError;
use crate::signal::Signal;
use crate::tree::Branch;

pub fn build(postfix: Vec<Signal>) -> Result<Branch, TranslationError> {
  if postfix.is_empty() {
    return Err(TranslationError::Empty);
  }
  let mut operands: Vec<Branch> = Vec::new();
  for signal in postfix {
    let branch = match signal {
      Signal::Literal(literal) => Branch::Literal(literal),
      Signal::Variable(variable) => Branch::Variable(variable),
      Signal::Unary(op) => {
        let operand = operands.pop().ok_or(TranslationError::Malformed {
          remaining: 0,
        })?;
        Branch::unary(op, operand)
      }
      Signal::Binary(op) => {
        let right = operands.pop();
        let left = operands.pop();
        match (left, right) {
          (Some(left), Some(right)) => Branch::binary(op, left, right),
          (_, right) => {
            return Err(TranslationError::Malformed {
              remaining: usize::from(right.is_some()),
            });
          }
        }
      }
      Signal::LeftParen | Signal::RightParen | Signal::Comma | Signal::End => {
        return Err(TranslationError::Malformed {
          remaining: operands.len(),
        });
      }
    };
    operands.push(branch);
  }
  match operands.pop() {
    Some(root) if operands.is_empty() => Ok(root),
    _ => Err(TranslationError::Malformed {
      remaining: operands.len() + 1,
    }),
  }
}
