//! Tree transforms. Every rule runs bottom-up: children are rewritten
//! first, then the operator's own rule from `crate::operators` is applied
//! to the node.

mod derivative;
mod expand;
mod fold;
mod render;
mod simplify;

pub use render::format_number;
