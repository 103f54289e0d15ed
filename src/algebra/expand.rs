use crate::lexicon::{Binding, Lexicon, Variable};
use crate::tree::Branch;

impl Branch {
  /// Multiplies out products over sums, innermost first.
  pub fn distribute(self) -> Branch {
    match self {
      Branch::Unary { op, operand } => Branch::unary(op, operand.distribute()),
      Branch::Binary { op, left, right } => {
        op.distribute(left.distribute(), right.distribute())
      }
      leaf => leaf,
    }
  }

  /// Replaces named-expression variables by their definitions, recursively.
  /// A definition that reaches itself again is left as a variable.
  pub fn inline_definitions(self, lexicon: &Lexicon) -> Branch {
    self.inline_in(lexicon, None, &mut Vec::new())
  }

  /// Inlines only the definitions that end up mentioning `variable`, so a
  /// substitution of `variable` reaches through them. `variable` itself is
  /// never inlined.
  pub fn inline_mentioning(
    self,
    variable: &Variable,
    lexicon: &Lexicon,
  ) -> Branch {
    self.inline_in(lexicon, Some(variable), &mut Vec::new())
  }

  fn inline_in(
    self,
    lexicon: &Lexicon,
    target: Option<&Variable>,
    active: &mut Vec<Variable>,
  ) -> Branch {
    match self {
      Branch::Variable(variable) if target == Some(&variable) => {
        Branch::Variable(variable)
      }
      Branch::Variable(variable) => match lexicon.binding(&variable) {
        Binding::Expression(definition) if !active.contains(&variable) => {
          active.push(variable);
          let inlined = definition.inline_in(lexicon, target, active);
          active.pop();
          match target {
            Some(target) if !inlined.depends_on(target) => {
              Branch::Variable(variable)
            }
            _ => inlined,
          }
        }
        Binding::Expression(_) => {
          tracing::warn!(
            variable = %lexicon.name_of(&variable),
            "cyclic definition left in place"
          );
          Branch::Variable(variable)
        }
        _ => Branch::Variable(variable),
      },
      Branch::Unary { op, operand } => {
        Branch::unary(op, operand.inline_in(lexicon, target, active))
      }
      Branch::Binary { op, left, right } => Branch::binary(
        op,
        left.inline_in(lexicon, target, active),
        right.inline_in(lexicon, target, active),
      ),
      literal => literal,
    }
  }
}
