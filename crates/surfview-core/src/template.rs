//! Placeholder substitution for Content, HTML-Link, and SubQuery templates.
//!
//! Pure string substitution. The templates are opaque payloads; only
//! `@Name` tokens are meaningful here, and nothing is evaluated.

use crate::error::UnboundPlaceholderError;
use std::collections::BTreeMap;
use std::fmt;

///
/// BindingValue
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BindingValue {
    /// Substitutes the literal `null`. No coalescing logic is applied.
    Null,
    Text(String),
}

impl BindingValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for BindingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BindingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for BindingValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

///
/// Bindings
///
/// Explicit placeholder → value map. Passed into every evaluation; there
/// is no ambient binding state.
///

#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: BTreeMap<String, BindingValue>,
}

impl Bindings {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<BindingValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<BindingValue>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BindingValue> {
        self.values.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Substitute every `@Name` placeholder in `template`.
///
/// Placeholder names are `[A-Za-z_][A-Za-z0-9_]*`, longest match, so
/// `@Field10` never resolves through a `Field1` binding. A `@` followed
/// by no identifier is literal text.
pub fn evaluate(template: &str, bindings: &Bindings) -> Result<String, UnboundPlaceholderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(at) = rest.find('@') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        let len = placeholder_len(tail);

        if len == 0 {
            out.push('@');
            rest = tail;
            continue;
        }

        let name = &tail[..len];
        match bindings.get(name) {
            Some(value) => out.push_str(&value.to_string()),
            None => {
                return Err(UnboundPlaceholderError {
                    placeholder: name.to_string(),
                });
            }
        }
        rest = &tail[len..];
    }

    out.push_str(rest);
    Ok(out)
}

// Length of the identifier at the head of `s`, 0 if none.
fn placeholder_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }

    for (i, c) in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return i;
        }
    }
    s.len()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_place() {
        let bindings = Bindings::new()
            .with("Field1", "X")
            .with("Field2", BindingValue::Null);

        let out = evaluate("COALESCE(@Field2, @Field1)", &bindings).unwrap();
        assert_eq!(out, "COALESCE(null, X)");
    }

    #[test]
    fn longest_match_wins() {
        let bindings = Bindings::new()
            .with("Field1", "one")
            .with("Field10", "ten");

        let out = evaluate("@Field10 @Field1", &bindings).unwrap();
        assert_eq!(out, "ten one");
    }

    #[test]
    fn where_placeholder() {
        let bindings = Bindings::new().with("WHERE", "id = 'FS_001'");

        let out = evaluate(
            "SELECT id FROM shares WHERE @WHERE GROUP BY id",
            &bindings,
        )
        .unwrap();
        assert_eq!(out, "SELECT id FROM shares WHERE id = 'FS_001' GROUP BY id");
    }

    #[test]
    fn unbound_placeholder_fails_with_name() {
        let err = evaluate("WHERE @WHERE", &Bindings::new()).unwrap_err();
        assert_eq!(err.placeholder, "WHERE");
    }

    #[test]
    fn bare_at_is_literal() {
        let out = evaluate("a@@ b @ c", &Bindings::new()).unwrap();
        assert_eq!(out, "a@@ b @ c");
    }

    #[test]
    fn at_digit_is_literal() {
        let out = evaluate("version @1", &Bindings::new()).unwrap();
        assert_eq!(out, "version @1");
    }

    #[test]
    fn option_binding_maps_none_to_null() {
        let bindings = Bindings::new().with("Field1", None::<String>);
        let out = evaluate("@Field1", &bindings).unwrap();
        assert_eq!(out, "null");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let out = evaluate("SELECT 1", &Bindings::new()).unwrap();
        assert_eq!(out, "SELECT 1");
    }
}
