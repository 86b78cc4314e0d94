use crate::error::SchemaMismatchError;
use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

///
/// ElementName
///
/// A namespaced `prefix:name` identifier such as `fs:fsData`; the key
/// under which a data type is known to the archive.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ElementName(String);

impl ElementName {
    /// Parse a `prefix:name` pair; both halves must be identifiers.
    pub fn parse(value: &str) -> Result<Self, SchemaMismatchError> {
        let mismatch = || SchemaMismatchError {
            value: value.to_string(),
        };

        let (prefix, name) = value.split_once(':').ok_or_else(mismatch)?;
        if !is_identifier(prefix) || !is_identifier(name) {
            return Err(mismatch());
        }

        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        self.0.split_once(':').map_or("", |(prefix, _)| prefix)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, name)| name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ElementName {
    type Err = SchemaMismatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Identifier shape shared by both halves of an element name.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

///
/// DataType
///
/// Rendering hint for a display field; the wire form is lowercase.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum DataType {
    #[display("boolean")]
    Boolean,
    #[display("date")]
    Date,
    #[display("float")]
    Float,
    #[display("integer")]
    Integer,
    #[display("string")]
    String,
    #[display("timestamp")]
    Timestamp,
}

impl DataType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Integer)
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(Self::Boolean),
            "date" => Ok(Self::Date),
            "float" => Ok(Self::Float),
            "integer" => Ok(Self::Integer),
            "string" => Ok(Self::String),
            "timestamp" => Ok(Self::Timestamp),
            other => Err(format!("unknown data type '{other}'")),
        }
    }
}

///
/// SortOrder
///
/// Default sort direction of a display version; the wire form is uppercase.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
pub enum SortOrder {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_name_accepts_namespaced_identifier() {
        let element = ElementName::parse("fs:fsData").unwrap();
        assert_eq!(element.prefix(), "fs");
        assert_eq!(element.name(), "fsData");
        assert_eq!(element.to_string(), "fs:fsData");
    }

    #[test]
    fn element_name_rejects_missing_prefix() {
        let err = ElementName::parse("freesurfer").unwrap_err();
        assert_eq!(err.value, "freesurfer");
    }

    #[test]
    fn element_name_rejects_bad_halves() {
        assert!(ElementName::parse(":fsData").is_err());
        assert!(ElementName::parse("fs:").is_err());
        assert!(ElementName::parse("f s:fsData").is_err());
        assert!(ElementName::parse("fs:fs.Data").is_err());
        assert!(ElementName::parse("1fs:fsData").is_err());
    }

    #[test]
    fn data_type_round_trips_wire_form() {
        for s in ["boolean", "date", "float", "integer", "string", "timestamp"] {
            let dt: DataType = s.parse().unwrap();
            assert_eq!(dt.to_string(), s);
        }
        assert!("blob".parse::<DataType>().is_err());
    }

    #[test]
    fn sort_order_round_trips_wire_form() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.to_string(), "DESC");
        assert!("descending".parse::<SortOrder>().is_err());
    }

    #[test]
    fn sort_order_defaults_ascending() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
