use std::fmt;

use super::{Differentiated, Position, is_true, precedence, truth};
use crate::lexicon::Lexicon;
use crate::operators::UnaryOp;
use crate::tree::Branch;

/// Operators taking a left and a right operand.
///
/// `Max`, `Min` and the Macaulay brackets are written call-style,
/// `max(a,b)`, but combine their operands exactly like `a max b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  IntDiv,
  Mod,
  Pow,
  Lt,
  Le,
  Eq,
  Gt,
  Ge,
  Ne,
  And,
  Or,
  Max,
  Min,
  /// `FmacN(x, a)` = <x - a>^N
  Macaulay(u32),
}

impl BinaryOp {
  /// Every operator except the open-ended Macaulay family.
  pub const FIXED: [BinaryOp; 17] = [
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::IntDiv,
    BinaryOp::Mod,
    BinaryOp::Pow,
    BinaryOp::Lt,
    BinaryOp::Le,
    BinaryOp::Eq,
    BinaryOp::Gt,
    BinaryOp::Ge,
    BinaryOp::Ne,
    BinaryOp::And,
    BinaryOp::Or,
    BinaryOp::Max,
    BinaryOp::Min,
  ];

  pub fn from_name(name: &str) -> Option<Self> {
    if let Some(op) =
      Self::FIXED.iter().copied().find(|op| op.symbol() == name)
    {
      return Some(op);
    }
    let order = name.strip_prefix("Fmac")?;
    if order.is_empty() || !order.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    order.parse().ok().map(BinaryOp::Macaulay)
  }

  fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::IntDiv => "div",
      BinaryOp::Mod => "mod",
      BinaryOp::Pow => "^",
      BinaryOp::Lt => "<",
      BinaryOp::Le => "<=",
      BinaryOp::Eq => "==",
      BinaryOp::Gt => ">",
      BinaryOp::Ge => ">=",
      BinaryOp::Ne => "!=",
      BinaryOp::And => "and",
      BinaryOp::Or => "or",
      BinaryOp::Max => "max",
      BinaryOp::Min => "min",
      BinaryOp::Macaulay(_) => "Fmac",
    }
  }

  pub fn precedence(self) -> i32 {
    match self {
      BinaryOp::Or => precedence::OR,
      BinaryOp::And => precedence::AND,
      BinaryOp::Lt
      | BinaryOp::Le
      | BinaryOp::Eq
      | BinaryOp::Gt
      | BinaryOp::Ge
      | BinaryOp::Ne => precedence::COMPARISON,
      BinaryOp::Add
      | BinaryOp::Sub
      | BinaryOp::Max
      | BinaryOp::Min
      | BinaryOp::Macaulay(_) => precedence::ADDITIVE,
      BinaryOp::Mul | BinaryOp::Div | BinaryOp::IntDiv | BinaryOp::Mod => {
        precedence::MULTIPLICATIVE
      }
      BinaryOp::Pow => precedence::UNARY,
    }
  }

  pub fn position(self) -> Position {
    match self {
      BinaryOp::Max | BinaryOp::Min | BinaryOp::Macaulay(_) => Position::Prefix,
      _ => Position::Infix,
    }
  }

  pub fn evaluate(self, a: f64, b: f64) -> f64 {
    match self {
      BinaryOp::Add => a + b,
      BinaryOp::Sub => a - b,
      BinaryOp::Mul => a * b,
      BinaryOp::Div => a / b,
      BinaryOp::IntDiv => (a / b).trunc(),
      BinaryOp::Mod => a % b,
      BinaryOp::Pow => a.powf(b),
      BinaryOp::Lt => truth(a < b),
      BinaryOp::Le => truth(a <= b),
      BinaryOp::Eq => truth(a == b),
      BinaryOp::Gt => truth(a > b),
      BinaryOp::Ge => truth(a >= b),
      BinaryOp::Ne => truth(a != b),
      BinaryOp::And => truth(is_true(a) && is_true(b)),
      BinaryOp::Or => truth(is_true(a) || is_true(b)),
      BinaryOp::Max => a.max(b),
      BinaryOp::Min => a.min(b),
      BinaryOp::Macaulay(order) => macaulay(order, a, b),
    }
  }

  /// Applies the operator's own identities to already simplified operands.
  pub fn simplify(
    self,
    left: Branch,
    right: Branch,
    lexicon: &Lexicon,
  ) -> Branch {
    match self {
      // 0 + x = x, x + 0 = x
      BinaryOp::Add if left.is_number(0.0) => right,
      BinaryOp::Add if right.is_number(0.0) => left,
      // x - 0 = x
      BinaryOp::Sub if right.is_number(0.0) => left,
      // 0 * x = 0, x * 0 = 0
      BinaryOp::Mul if left.is_number(0.0) => left,
      BinaryOp::Mul if right.is_number(0.0) => right,
      // 1 * x = x, x * 1 = x
      BinaryOp::Mul if left.is_number(1.0) => right,
      BinaryOp::Mul if right.is_number(1.0) => left,
      // x / 1 = x
      BinaryOp::Div if right.is_number(1.0) => left,
      // x^1 = x, x^0 = 1
      BinaryOp::Pow if right.is_number(1.0) => left,
      BinaryOp::Pow if right.is_number(0.0) => Branch::number(lexicon, 1.0),
      _ => Branch::binary(self, left, right),
    }
  }

  /// a*(b+c) -> a*b + a*c and (b+c)*a -> b*a + c*a, same for `-`.
  ///
  /// Operands are expected to be distributed already; the products created
  /// here are distributed again so nested sums expand fully.
  pub fn distribute(self, left: Branch, right: Branch) -> Branch {
    if self != BinaryOp::Mul {
      return Branch::binary(self, left, right);
    }
    match (left, right) {
      (a, Branch::Binary { op, left: b, right: c })
        if matches!(op, BinaryOp::Add | BinaryOp::Sub) =>
      {
        let ab = BinaryOp::Mul.distribute(a.clone(), *b);
        let ac = BinaryOp::Mul.distribute(a, *c);
        Branch::binary(op, ab, ac)
      }
      (Branch::Binary { op, left: b, right: c }, a)
        if matches!(op, BinaryOp::Add | BinaryOp::Sub) =>
      {
        let ba = BinaryOp::Mul.distribute(*b, a.clone());
        let ca = BinaryOp::Mul.distribute(*c, a);
        Branch::binary(op, ba, ca)
      }
      (left, right) => Branch::binary(BinaryOp::Mul, left, right),
    }
  }

  pub fn differentiate(
    self,
    l: Differentiated<'_>,
    r: Differentiated<'_>,
    lexicon: &Lexicon,
  ) -> Branch {
    let zero = || Branch::number(lexicon, 0.0);
    if !l.varies && !r.varies {
      return zero();
    }
    let (u, v) = (l.branch.clone(), r.branch.clone());
    let (du, dv) = (l.derivative, r.derivative);
    let mul = |a: Branch, b: Branch| Branch::binary(BinaryOp::Mul, a, b);
    match self {
      BinaryOp::Add | BinaryOp::Sub => Branch::binary(self, du, dv),
      // Product rule: u'v + uv'
      BinaryOp::Mul => {
        Branch::binary(BinaryOp::Add, mul(du, v), mul(u, dv))
      }
      // Quotient rule: (u'v - uv') / v^2
      BinaryOp::Div => Branch::binary(
        BinaryOp::Div,
        Branch::binary(BinaryOp::Sub, mul(du, v.clone()), mul(u, dv)),
        Branch::unary(UnaryOp::Sqr, v),
      ),
      BinaryOp::Pow => {
        let power = Branch::binary(BinaryOp::Pow, u.clone(), v.clone());
        if !r.varies {
          // d/dx[u^n] = n * u^(n-1) * u'
          let one = Branch::number(lexicon, 1.0);
          let reduced = Branch::binary(
            BinaryOp::Pow,
            u,
            Branch::binary(BinaryOp::Sub, v.clone(), one),
          );
          mul(mul(v, reduced), du)
        } else if !l.varies {
          // d/dx[a^v] = a^v * ln(a) * v'
          mul(mul(power, Branch::unary(UnaryOp::Ln, u)), dv)
        } else {
          // d/dx[u^v] = u^v * (v' ln(u) + v u'/u)
          let log_part = mul(dv, Branch::unary(UnaryOp::Ln, u.clone()));
          let ratio = Branch::binary(BinaryOp::Div, mul(v, du), u);
          mul(power, Branch::binary(BinaryOp::Add, log_part, ratio))
        }
      }
      // a mod b = a - b*trunc(a/b), the truncation is locally constant
      BinaryOp::Mod => Branch::binary(
        BinaryOp::Sub,
        du,
        mul(dv, Branch::binary(BinaryOp::IntDiv, u, v)),
      ),
      BinaryOp::IntDiv
      | BinaryOp::Lt
      | BinaryOp::Le
      | BinaryOp::Eq
      | BinaryOp::Gt
      | BinaryOp::Ge
      | BinaryOp::Ne
      | BinaryOp::And
      | BinaryOp::Or => zero(),
      // The comparison picks whichever operand is currently selected
      BinaryOp::Max | BinaryOp::Min => {
        let (take_left, take_right) = if self == BinaryOp::Max {
          (BinaryOp::Ge, BinaryOp::Lt)
        } else {
          (BinaryOp::Le, BinaryOp::Gt)
        };
        Branch::binary(
          BinaryOp::Add,
          mul(Branch::binary(take_left, u.clone(), v.clone()), du),
          mul(Branch::binary(take_right, u, v), dv),
        )
      }
      BinaryOp::Macaulay(0) => zero(),
      // d/dx <u - v>^n = n <u - v>^(n-1) (u' - v')
      BinaryOp::Macaulay(order) => mul(
        mul(
          Branch::number(lexicon, f64::from(order)),
          Branch::binary(BinaryOp::Macaulay(order - 1), u, v),
        ),
        Branch::binary(BinaryOp::Sub, du, dv),
      ),
    }
  }
}

fn macaulay(order: u32, x: f64, threshold: f64) -> f64 {
  if x <= threshold {
    return 0.0;
  }
  let d = x - threshold;
  match i32::try_from(order) {
    Ok(n) => d.powi(n),
    Err(_) => d.powf(f64::from(order)),
  }
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BinaryOp::Macaulay(order) => write!(f, "Fmac{order}"),
      op => f.write_str(op.symbol()),
    }
  }
}
