pub mod error;
pub mod registry;
pub mod resolve;
pub mod template;

use crate::error::{RegistryError, ResolveError, UnboundPlaceholderError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::{RegistryError, ResolveError, UnboundPlaceholderError},
        registry::Registry,
        resolve::{ResolvedField, resolve_field},
        template::{BindingValue, Bindings, evaluate},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Template(#[from] UnboundPlaceholderError),
}
