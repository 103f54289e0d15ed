//! Text to tree: tokenizer, shunting-yard, tree builder.

pub mod shunting_yard;
pub mod tokenizer;
pub mod tree_builder;

pub use shunting_yard::to_postfix;
pub use tokenizer::{Token, Tokenized, tokenize};
pub use tree_builder::build;

use crate::TranslationError;
use crate::lexicon::Lexicon;
use crate::tree::Branch;

/// Outcome of a parse. `tree` is only present when `errors` is empty.
#[derive(Debug, Default)]
pub struct Parsed {
  pub tree: Option<Branch>,
  pub errors: Vec<TranslationError>,
}

/// Runs the whole pipeline. Identifiers that are not operators are
/// declared in `lexicon` as they are met, even when the text turns out to
/// be malformed.
pub fn parse(text: &str, lexicon: &Lexicon) -> Parsed {
  let Tokenized { tokens, errors } = tokenize(text, lexicon);
  tracing::trace!(
    text,
    tokens = tokens.len(),
    errors = errors.len(),
    "tokenized"
  );
  if !errors.is_empty() {
    tracing::debug!(text, ?errors, "rejected expression");
    return Parsed { tree: None, errors };
  }
  let built = to_postfix(tokens).and_then(|postfix| {
    tracing::trace!(
      postfix = %postfix
        .iter()
        .map(|signal| signal.name(lexicon))
        .collect::<Vec<_>>()
        .join(" "),
      "postfix"
    );
    build(postfix)
  });
  match built {
    Ok(tree) => Parsed {
      tree: Some(tree),
      errors: Vec::new(),
    },
    Err(error) => Parsed {
      tree: None,
      errors: vec![error],
    },
  }
}
