use crate::lexicon::{Lexicon, Variable};
use crate::tree::Branch;

impl Branch {
  /// Replaces every maximal evaluable subtree with a literal leaf holding
  /// its value. Subtrees that still mention unbound variables are kept, so
  /// the result may be partially folded.
  pub fn fold(&mut self, lexicon: &Lexicon) {
    self.fold_in(lexicon, &mut Vec::new());
  }

  fn fold_in(
    &mut self,
    lexicon: &Lexicon,
    active: &mut Vec<Variable>,
  ) -> Option<f64> {
    let value = match self {
      Branch::Literal(literal) => return Some(literal.value()),
      Branch::Variable(variable) => lexicon.variable_value(variable, active),
      Branch::Unary { op, operand } => {
        operand.fold_in(lexicon, active).map(|x| op.evaluate(x))
      }
      Branch::Binary { op, left, right } => {
        // Fold both sides even when one of them stays symbolic
        let a = left.fold_in(lexicon, active);
        let b = right.fold_in(lexicon, active);
        a.zip(b).map(|(a, b)| op.evaluate(a, b))
      }
    };
    if let Some(value) = value {
      *self = Branch::number(lexicon, value);
    }
    value
  }
}
