use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorTree
///
/// Flat, route-keyed aggregation of validation failures. A single load
/// reports every reference violation at once instead of stopping at the
/// first one.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorTree {
    entries: Vec<(String, String)>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one failure under a route such as `display_field.EXPT_ID`.
    pub fn add(&mut self, route: impl Into<String>, message: impl Into<String>) {
        self.entries.push((route.into(), message.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate `(route, message)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(r, m)| (r.as_str(), m.as_str()))
    }

    /// Collapse into `Err(self)` when any failure was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, message)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{route}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted failure on an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $route:expr, $($arg:tt)*) => {
        $errs.add($route, format!($($arg)*))
    };
}

///
/// MalformedDocumentError
///
/// Structural or reference violation in a descriptor document.
/// Unrecoverable; the load is aborted.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum MalformedDocumentError {
    #[error("duplicate <{element}> child in <{parent}>")]
    DuplicateChild {
        parent: &'static str,
        element: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>: {reason}")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
        reason: String,
    },

    #[error(
        "<DisplayFieldElement> '{name}' must carry exactly one of 'schema-element' or 'viewName'+'viewColumn'"
    )]
    InvalidFieldSource { name: String },

    #[error("missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("missing required <{element}> child in <{parent}>")]
    MissingChild {
        parent: &'static str,
        element: &'static str,
    },

    #[error("document has no <Displays> root element")]
    MissingRoot,

    #[error("unexpected <{element}> under <{parent}>")]
    UnexpectedElement {
        parent: &'static str,
        element: String,
    },

    #[error("descriptor validation failed: {0}")]
    Validation(ErrorTree),

    #[error("xml syntax error: {0}")]
    Xml(String),
}

///
/// SchemaMismatchError
///
/// The root `schema-element` does not have the namespaced `prefix:name`
/// shape the archive expects.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("schema element '{value}' is not a namespaced 'prefix:name' identifier")]
pub struct SchemaMismatchError {
    pub value: String,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_tree_collects_in_order() {
        let mut errs = ErrorTree::new();
        err!(errs, "display_field.A", "first");
        err!(errs, "display_field.B", "second {}", 2);

        assert_eq!(errs.len(), 2);
        let routes: Vec<&str> = errs.iter().map(|(r, _)| r).collect();
        assert_eq!(routes, vec!["display_field.A", "display_field.B"]);
        assert_eq!(errs.to_string(), "display_field.A: first; display_field.B: second 2");
    }

    #[test]
    fn empty_tree_resolves_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn non_empty_tree_resolves_err() {
        let mut errs = ErrorTree::new();
        errs.add("root", "bad");
        assert!(errs.result().is_err());
    }
}
