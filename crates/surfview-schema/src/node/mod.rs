mod arc;
mod display;
mod field;
mod link;
mod version;
mod view;

pub use arc::*;
pub use display::*;
pub use field::*;
pub use link::*;
pub use version::*;
pub use view::*;

use crate::error::ErrorTree;

///
/// ValidateNode
///
/// Node-local structural checks. Document-wide invariants (duplicate ids,
/// reference resolution) live in `validate::refs` and need the whole
/// descriptor.
///

pub trait ValidateNode {
    fn validate(&self, _errs: &mut ErrorTree) {}
}
