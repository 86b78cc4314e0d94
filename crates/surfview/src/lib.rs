//! surfview — display-descriptor configuration for research imaging archives
//!
//! This is the public meta-crate. Downstream users depend on **surfview**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `surfview-schema` (descriptor model, document codec, validation)
//!   - `surfview-core`   (registry, field resolution, template evaluation)

pub use surfview_core as core;
pub use surfview_schema as schema;

//
// Prelude
//

pub mod prelude {
    pub use surfview_core::prelude::*;
    pub use surfview_schema::prelude::*;
}
