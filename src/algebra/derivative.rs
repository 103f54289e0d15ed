use crate::lexicon::{Lexicon, Variable};
use crate::operators::Differentiated;
use crate::tree::Branch;

impl Branch {
  /// d(self)/d(variable).
  ///
  /// Named-expression variables are treated as independent symbols here;
  /// inline their definitions first to differentiate through them. The
  /// result is not simplified.
  pub fn differentiate(
    &self,
    variable: &Variable,
    lexicon: &Lexicon,
  ) -> Branch {
    match self {
      Branch::Literal(_) => Branch::number(lexicon, 0.0),
      Branch::Variable(v) => {
        Branch::number(lexicon, if v == variable { 1.0 } else { 0.0 })
      }
      Branch::Unary { op, operand } => {
        op.differentiate(part(operand, variable, lexicon), lexicon)
      }
      Branch::Binary { op, left, right } => op.differentiate(
        part(left, variable, lexicon),
        part(right, variable, lexicon),
        lexicon,
      ),
    }
  }
}

fn part<'a>(
  branch: &'a Branch,
  variable: &Variable,
  lexicon: &Lexicon,
) -> Differentiated<'a> {
  let varies = branch.depends_on(variable);
  let derivative = if varies {
    branch.differentiate(variable, lexicon)
  } else {
    Branch::number(lexicon, 0.0)
  };
  Differentiated {
    branch,
    derivative,
    varies,
  }
}
