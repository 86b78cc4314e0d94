use surfview_schema::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ResolveError {
    #[error("no descriptor registered for element '{element}'")]
    UnknownDescriptor { element: String },

    #[error("display field '{id}' is not declared by element '{element}'")]
    UnknownField { element: String, id: String },

    #[error("display version '{version}' is not declared by element '{element}'")]
    UnknownVersion { element: String, version: String },
}

///
/// RegistryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("duplicate descriptor for element '{element}'")]
    DuplicateDescriptor { element: String },

    #[error("descriptor linking failed: {0}")]
    Link(ErrorTree),
}

///
/// UnboundPlaceholderError
///
/// Recoverable: the caller may retry the same template with complete
/// bindings.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unbound placeholder '@{placeholder}' in template")]
pub struct UnboundPlaceholderError {
    pub placeholder: String,
}
