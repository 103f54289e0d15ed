use crate::lexicon::Lexicon;
use crate::operators::{Position, UnaryOp, precedence};
use crate::signal::OPERAND_PRECEDENCE;
use crate::tree::Branch;

/// Shortest text that parses back to exactly `value`. Infinities and NaN
/// have no literal form and are written as the divisions that produce them.
pub fn format_number(value: f64) -> String {
  if value.is_nan() {
    "(0 / 0)".to_string()
  } else if value.is_infinite() {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("({sign}1 / 0)")
  } else {
    format!("{value}")
  }
}

impl Branch {
  /// Infix text that parses back to an equivalent tree.
  ///
  /// A left operand is parenthesised when it binds looser than its parent,
  /// a right operand also when it binds equally, since equal precedence
  /// re-associates to the left.
  pub fn render(&self, lexicon: &Lexicon) -> String {
    let mut out = String::new();
    self.write_to(lexicon, &mut out);
    out
  }

  fn render_precedence(&self) -> i32 {
    match self {
      Branch::Literal(literal)
        if literal.value().is_finite() && literal.value().is_sign_negative() =>
      {
        precedence::UNARY
      }
      Branch::Literal(_) | Branch::Variable(_) => OPERAND_PRECEDENCE,
      Branch::Unary { op, .. } => op.precedence(),
      Branch::Binary { op, .. } if op.position() == Position::Prefix => {
        OPERAND_PRECEDENCE
      }
      Branch::Binary { op, .. } => op.precedence(),
    }
  }

  fn write_to(&self, lexicon: &Lexicon, out: &mut String) {
    match self {
      Branch::Literal(literal) => out.push_str(&format_number(literal.value())),
      Branch::Variable(variable) => out.push_str(&lexicon.name_of(variable)),
      Branch::Unary {
        op: UnaryOp::Neg,
        operand,
      } => {
        out.push('-');
        let bare =
          operand.is_leaf() && operand.render_precedence() > precedence::UNARY;
        operand.write_grouped(lexicon, out, !bare);
      }
      Branch::Unary { op, operand } => {
        out.push_str(op.name());
        operand.write_grouped(lexicon, out, true);
      }
      Branch::Binary { op, left, right }
        if op.position() == Position::Prefix =>
      {
        out.push_str(&op.to_string());
        out.push('(');
        left.write_to(lexicon, out);
        out.push_str(", ");
        right.write_to(lexicon, out);
        out.push(')');
      }
      Branch::Binary { op, left, right } => {
        let p = op.precedence();
        left.write_grouped(lexicon, out, left.render_precedence() < p);
        out.push(' ');
        out.push_str(&op.to_string());
        out.push(' ');
        right.write_grouped(lexicon, out, right.render_precedence() <= p);
      }
    }
  }

  fn write_grouped(&self, lexicon: &Lexicon, out: &mut String, grouped: bool) {
    if grouped {
      out.push('(');
      self.write_to(lexicon, out);
      out.push(')');
    } else {
      self.write_to(lexicon, out);
    }
  }
}
