//! Infix text to a flat token list.
//!
//! The scanner alternates between expecting an operand and expecting an
//! operator. Problems are recorded and scanning carries on, so one pass
//! reports every error in the input.

use crate::TranslationError;
use crate::lexicon::Lexicon;
use crate::operators::{BinaryOp, Position, UnaryOp};
use crate::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub signal: Signal,
  /// Byte offset of the token in the source text.
  pub offset: usize,
}

/// Tokens always end with `Signal::End`.
#[derive(Debug, Default)]
pub struct Tokenized {
  pub tokens: Vec<Token>,
  pub errors: Vec<TranslationError>,
}

impl Tokenized {
  pub fn is_ok(&self) -> bool {
    self.errors.is_empty()
  }
}

enum Paren {
  Group { offset: usize },
  Call { offset: usize, op: BinaryOp, commas: usize },
}

struct Scanner<'a> {
  text: &'a str,
  bytes: &'a [u8],
  pos: usize,
  lexicon: &'a Lexicon,
  out: Tokenized,
  expect_operand: bool,
  parens: Vec<Paren>,
  /// Call-style operator still waiting for its `(`.
  pending_call: Option<(usize, BinaryOp)>,
}

pub fn tokenize(text: &str, lexicon: &Lexicon) -> Tokenized {
  let mut scanner = Scanner {
    text,
    bytes: text.as_bytes(),
    pos: 0,
    lexicon,
    out: Tokenized::default(),
    expect_operand: true,
    parens: Vec::new(),
    pending_call: None,
  };
  scanner.run();
  scanner.out
}

impl Scanner<'_> {
  fn run(&mut self) {
    while let Some(c) = self.peek() {
      if c.is_ascii_whitespace() {
        self.pos += 1;
        continue;
      }
      let start = self.pos;
      if c != b'(' {
        if let Some((offset, op)) = self.pending_call.take() {
          self.error(TranslationError::MissingArguments {
            offset,
            name: op.to_string(),
          });
        }
      }
      match c {
        b'0'..=b'9' | b'.' => self.number(start),
        c if c.is_ascii_alphabetic() => self.identifier(start),
        b'(' => self.open(start),
        b')' => self.close(start),
        b',' => self.comma(start),
        b'+' | b'-' | b'*' | b'/' | b'^' | b'<' | b'>' | b'=' | b'!' => {
          self.punctuation(start)
        }
        _ => {
          let symbol = self.text[start..].chars().next().unwrap_or('?');
          self.pos += symbol.len_utf8();
          self.error(TranslationError::UnknownSymbol {
            offset: start,
            symbol: symbol.to_string(),
          });
        }
      }
    }
    self.finish();
  }

  fn peek(&self) -> Option<u8> {
    self.bytes.get(self.pos).copied()
  }

  fn error(&mut self, error: TranslationError) {
    self.out.errors.push(error);
  }

  fn emit(&mut self, signal: Signal, offset: usize) {
    self.out.tokens.push(Token { signal, offset });
  }

  /// Operands and prefix operators are only valid where an operand is
  /// expected.
  fn require_operand_position(&mut self, offset: usize) {
    if !self.expect_operand {
      self.error(TranslationError::MissingOperator { offset });
    }
  }

  fn require_operator_position(&mut self, offset: usize) {
    if self.expect_operand {
      self.error(TranslationError::Truncated { offset });
    }
  }

  fn number(&mut self, start: usize) {
    while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
      self.pos += 1;
    }
    // Exponent only when digits follow: `2e3`, `1.5E-4`
    if matches!(self.peek(), Some(b'e' | b'E')) {
      let mut end = self.pos + 1;
      if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
      }
      if matches!(self.bytes.get(end), Some(b'0'..=b'9')) {
        self.pos = end;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
          self.pos += 1;
        }
      }
    }
    let source = self.text;
    let text = &source[start..self.pos];
    self.require_operand_position(start);
    match text.parse::<f64>() {
      Ok(value) => {
        let literal = self.lexicon.intern(value);
        self.emit(Signal::Literal(literal), start);
      }
      Err(_) => self.error(TranslationError::InvalidNumber {
        offset: start,
        text: text.to_string(),
      }),
    }
    self.expect_operand = false;
  }

  fn identifier(&mut self, start: usize) {
    while matches!(
      self.peek(),
      Some(c) if c.is_ascii_alphanumeric() || c == b'_'
    ) {
      self.pos += 1;
    }
    let source = self.text;
    let name = &source[start..self.pos];
    let signal = self
      .lexicon
      .lookup(name)
      .unwrap_or_else(|| Signal::Variable(self.lexicon.declare_variable(name)));
    match signal {
      Signal::Binary(op) if op.position() == Position::Infix => {
        self.infix(op, start);
      }
      Signal::Binary(op) => {
        self.require_operand_position(start);
        self.emit(Signal::Binary(op), start);
        self.pending_call = Some((start, op));
        self.expect_operand = true;
      }
      Signal::Unary(op) => {
        self.require_operand_position(start);
        self.emit(Signal::Unary(op), start);
        self.expect_operand = true;
      }
      operand => {
        self.require_operand_position(start);
        self.emit(operand, start);
        self.expect_operand = false;
      }
    }
  }

  fn open(&mut self, start: usize) {
    self.pos += 1;
    match self.pending_call.take() {
      Some((offset, op)) => self.parens.push(Paren::Call {
        offset,
        op,
        commas: 0,
      }),
      None => {
        self.require_operand_position(start);
        self.parens.push(Paren::Group { offset: start });
      }
    }
    self.emit(Signal::LeftParen, start);
    self.expect_operand = true;
  }

  fn close(&mut self, start: usize) {
    self.pos += 1;
    let Some(paren) = self.parens.pop() else {
      self.error(TranslationError::UnmatchedParen { offset: start });
      self.emit(Signal::RightParen, start);
      self.expect_operand = false;
      return;
    };
    self.require_operator_position(start);
    if let Paren::Call { offset, op, commas } = paren {
      if commas != 1 {
        self.error(TranslationError::CallArity {
          offset,
          name: op.to_string(),
          found: commas + 1,
        });
      }
    }
    self.emit(Signal::RightParen, start);
    self.expect_operand = false;
  }

  fn comma(&mut self, start: usize) {
    self.pos += 1;
    match self.parens.last_mut() {
      Some(Paren::Call { commas, .. }) => *commas += 1,
      _ => {
        self.error(TranslationError::MisplacedComma { offset: start });
        self.expect_operand = true;
        return;
      }
    }
    self.require_operator_position(start);
    self.emit(Signal::Comma, start);
    self.expect_operand = true;
  }

  fn punctuation(&mut self, start: usize) {
    let first = self.bytes[start];
    let two = matches!(
      (first, self.bytes.get(start + 1)),
      (b'<' | b'>' | b'=' | b'!', Some(b'='))
    );
    self.pos += if two { 2 } else { 1 };
    let source = self.text;
    let symbol = &source[start..self.pos];
    let Some(op) = BinaryOp::from_name(symbol) else {
      self.error(TranslationError::UnknownSymbol {
        offset: start,
        symbol: symbol.to_string(),
      });
      return;
    };
    if self.expect_operand {
      match op {
        BinaryOp::Sub => self.emit(Signal::Unary(UnaryOp::Neg), start),
        // Unary plus
        BinaryOp::Add => {}
        _ => self.error(TranslationError::IllegalOperator {
          offset: start,
          operator: op.to_string(),
        }),
      }
      return;
    }
    self.infix(op, start);
  }

  fn infix(&mut self, op: BinaryOp, start: usize) {
    if self.expect_operand {
      self.error(TranslationError::IllegalOperator {
        offset: start,
        operator: op.to_string(),
      });
    }
    self.emit(Signal::Binary(op), start);
    self.expect_operand = true;
  }

  fn finish(&mut self) {
    let end = self.text.len();
    if let Some((offset, op)) = self.pending_call.take() {
      self.error(TranslationError::MissingArguments {
        offset,
        name: op.to_string(),
      });
    }
    if self.out.tokens.is_empty() {
      if self.out.errors.is_empty() {
        self.error(TranslationError::Empty);
      }
    } else if self.expect_operand {
      self.error(TranslationError::Truncated { offset: end });
    }
    for paren in std::mem::take(&mut self.parens) {
      let offset = match paren {
        Paren::Group { offset } | Paren::Call { offset, .. } => offset,
      };
      self.error(TranslationError::UnmatchedParen { offset });
    }
    self.emit(Signal::End, end);
  }
}
