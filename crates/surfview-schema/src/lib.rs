pub mod error;
pub mod node;
pub mod types;
pub mod validate;
pub mod xml;

/// Maximum length for display field identifiers.
pub const MAX_FIELD_ID_LEN: usize = 64;

/// Maximum length for display version names.
pub const MAX_VERSION_NAME_LEN: usize = 64;

use crate::error::{MalformedDocumentError, SchemaMismatchError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::{ErrorTree, MalformedDocumentError, SchemaMismatchError},
        node::*,
        types::{DataType, ElementName, SortOrder},
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedDocumentError),

    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatchError),
}

impl Error {
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    #[must_use]
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch(_))
    }
}
