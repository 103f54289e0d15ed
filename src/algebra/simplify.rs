use crate::lexicon::Lexicon;
use crate::tree::Branch;

impl Branch {
  /// Applies the additive and multiplicative identities bottom-up.
  ///
  /// Each node's rule sees operands that are already in normal form, so a
  /// second pass leaves the tree unchanged.
  pub fn simplify(self, lexicon: &Lexicon) -> Branch {
    match self {
      Branch::Unary { op, operand } => op.simplify(operand.simplify(lexicon)),
      Branch::Binary { op, left, right } => {
        let left = left.simplify(lexicon);
        let right = right.simplify(lexicon);
        op.simplify(left, right, lexicon)
      }
      leaf => leaf,
    }
  }
}
