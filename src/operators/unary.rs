use std::f64::consts::PI;
use std::fmt;

use super::{Differentiated, precedence, truth};
use crate::lexicon::Lexicon;
use crate::operators::BinaryOp;
use crate::tree::Branch;

/// Prefix operators taking a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
  Neg,
  Inv,
  Sign,
  Abs,
  Sqr,
  Sqrt,
  Exp,
  Ln,
  Lg,
  Pi,
  Sin,
  Cos,
  Tan,
  Atan,
  Sec,
  Cosec,
  Cotg,
  Deg2Rad,
  Rad2Deg,
  Round,
  Trunc,
  ToNum,
  Not,
}

impl UnaryOp {
  pub const ALL: [UnaryOp; 23] = [
    UnaryOp::Neg,
    UnaryOp::Inv,
    UnaryOp::Sign,
    UnaryOp::Abs,
    UnaryOp::Sqr,
    UnaryOp::Sqrt,
    UnaryOp::Exp,
    UnaryOp::Ln,
    UnaryOp::Lg,
    UnaryOp::Pi,
    UnaryOp::Sin,
    UnaryOp::Cos,
    UnaryOp::Tan,
    UnaryOp::Atan,
    UnaryOp::Sec,
    UnaryOp::Cosec,
    UnaryOp::Cotg,
    UnaryOp::Deg2Rad,
    UnaryOp::Rad2Deg,
    UnaryOp::Round,
    UnaryOp::Trunc,
    UnaryOp::ToNum,
    UnaryOp::Not,
  ];

  pub fn name(self) -> &'static str {
    match self {
      UnaryOp::Neg => "neg",
      UnaryOp::Inv => "inv",
      UnaryOp::Sign => "sign",
      UnaryOp::Abs => "abs",
      UnaryOp::Sqr => "sqr",
      UnaryOp::Sqrt => "sqrt",
      UnaryOp::Exp => "exp",
      UnaryOp::Ln => "ln",
      UnaryOp::Lg => "lg",
      UnaryOp::Pi => "PI",
      UnaryOp::Sin => "sin",
      UnaryOp::Cos => "cos",
      UnaryOp::Tan => "tan",
      UnaryOp::Atan => "atan",
      UnaryOp::Sec => "sec",
      UnaryOp::Cosec => "cosec",
      UnaryOp::Cotg => "cotg",
      UnaryOp::Deg2Rad => "deg2rad",
      UnaryOp::Rad2Deg => "rad2deg",
      UnaryOp::Round => "round",
      UnaryOp::Trunc => "trunc",
      UnaryOp::ToNum => "tonum",
      UnaryOp::Not => "not",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|op| op.name() == name)
  }

  pub fn precedence(self) -> i32 {
    match self {
      UnaryOp::Not => precedence::COMPARISON,
      _ => precedence::UNARY,
    }
  }

  pub fn evaluate(self, x: f64) -> f64 {
    match self {
      UnaryOp::Neg => -x,
      UnaryOp::Inv => 1.0 / x,
      UnaryOp::Sign => {
        if x == 0.0 {
          0.0
        } else {
          x.signum()
        }
      }
      UnaryOp::Abs => x.abs(),
      UnaryOp::Sqr => x * x,
      UnaryOp::Sqrt => x.sqrt(),
      UnaryOp::Exp => x.exp(),
      UnaryOp::Ln => x.ln(),
      UnaryOp::Lg => x.log10(),
      UnaryOp::Pi => PI * x,
      UnaryOp::Sin => x.sin(),
      UnaryOp::Cos => x.cos(),
      UnaryOp::Tan => x.tan(),
      UnaryOp::Atan => x.atan(),
      UnaryOp::Sec => 1.0 / x.cos(),
      UnaryOp::Cosec => 1.0 / x.sin(),
      UnaryOp::Cotg => 1.0 / x.tan(),
      UnaryOp::Deg2Rad => x.to_radians(),
      UnaryOp::Rad2Deg => x.to_degrees(),
      UnaryOp::Round => x.round(),
      UnaryOp::Trunc => x.trunc(),
      UnaryOp::ToNum => x,
      UnaryOp::Not => truth(x == 0.0),
    }
  }

  /// Applies the operator's own identity to an already simplified operand.
  pub fn simplify(self, operand: Branch) -> Branch {
    match (self, operand) {
      // --x = x
      (
        UnaryOp::Neg,
        Branch::Unary {
          op: UnaryOp::Neg,
          operand,
        },
      ) => *operand,
      (op, operand) => Branch::unary(op, operand),
    }
  }

  /// Chain rule: d/dx[f(u)] = f'(u) * u'.
  pub fn differentiate(
    self,
    u: Differentiated<'_>,
    lexicon: &Lexicon,
  ) -> Branch {
    if !u.varies {
      return Branch::number(lexicon, 0.0);
    }
    let du = u.derivative;
    let u = u.branch.clone();
    let times =
      |outer: Branch, du: Branch| Branch::binary(BinaryOp::Mul, outer, du);
    match self {
      UnaryOp::Neg => Branch::unary(UnaryOp::Neg, du),
      // d/dx[1/u] = -u' / u^2
      UnaryOp::Inv => Branch::binary(
        BinaryOp::Div,
        Branch::unary(UnaryOp::Neg, du),
        Branch::unary(UnaryOp::Sqr, u),
      ),
      // Piecewise constant
      UnaryOp::Sign | UnaryOp::Round | UnaryOp::Trunc | UnaryOp::Not => {
        Branch::number(lexicon, 0.0)
      }
      UnaryOp::Abs => times(Branch::unary(UnaryOp::Sign, u), du),
      // d/dx[u^2] = 2*u*u'
      UnaryOp::Sqr => times(
        Branch::binary(BinaryOp::Mul, Branch::number(lexicon, 2.0), u),
        du,
      ),
      // d/dx[sqrt(u)] = u' / (2*sqrt(u))
      UnaryOp::Sqrt => Branch::binary(
        BinaryOp::Div,
        du,
        Branch::binary(
          BinaryOp::Mul,
          Branch::number(lexicon, 2.0),
          Branch::unary(UnaryOp::Sqrt, u),
        ),
      ),
      UnaryOp::Exp => times(Branch::unary(UnaryOp::Exp, u), du),
      UnaryOp::Ln => Branch::binary(BinaryOp::Div, du, u),
      // d/dx[log10(u)] = u' / (u * ln(10))
      UnaryOp::Lg => Branch::binary(
        BinaryOp::Div,
        du,
        Branch::binary(
          BinaryOp::Mul,
          u,
          Branch::number(lexicon, std::f64::consts::LN_10),
        ),
      ),
      // Linear operators commute with d/dx
      UnaryOp::Pi | UnaryOp::Deg2Rad | UnaryOp::Rad2Deg | UnaryOp::ToNum => {
        Branch::unary(self, du)
      }
      UnaryOp::Sin => times(Branch::unary(UnaryOp::Cos, u), du),
      UnaryOp::Cos => times(
        Branch::unary(UnaryOp::Neg, Branch::unary(UnaryOp::Sin, u)),
        du,
      ),
      // d/dx[tan(u)] = sec(u)^2 * u'
      UnaryOp::Tan => times(
        Branch::unary(UnaryOp::Sqr, Branch::unary(UnaryOp::Sec, u)),
        du,
      ),
      // d/dx[atan(u)] = u' / (1 + u^2)
      UnaryOp::Atan => Branch::binary(
        BinaryOp::Div,
        du,
        Branch::binary(
          BinaryOp::Add,
          Branch::number(lexicon, 1.0),
          Branch::unary(UnaryOp::Sqr, u),
        ),
      ),
      // d/dx[sec(u)] = sec(u)*tan(u) * u'
      UnaryOp::Sec => times(
        Branch::binary(
          BinaryOp::Mul,
          Branch::unary(UnaryOp::Sec, u.clone()),
          Branch::unary(UnaryOp::Tan, u),
        ),
        du,
      ),
      // d/dx[cosec(u)] = -cosec(u)*cotg(u) * u'
      UnaryOp::Cosec => times(
        Branch::unary(
          UnaryOp::Neg,
          Branch::binary(
            BinaryOp::Mul,
            Branch::unary(UnaryOp::Cosec, u.clone()),
            Branch::unary(UnaryOp::Cotg, u),
          ),
        ),
        du,
      ),
      // d/dx[cotg(u)] = -cosec(u)^2 * u'
      UnaryOp::Cotg => times(
        Branch::unary(
          UnaryOp::Neg,
          Branch::unary(UnaryOp::Sqr, Branch::unary(UnaryOp::Cosec, u)),
        ),
        du,
      ),
    }
  }
}

impl fmt::Display for UnaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
