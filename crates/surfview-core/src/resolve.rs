//! Per-descriptor field resolution.
//!
//! Cross-entity references resolve against sibling descriptors owned by
//! the caller's [`crate::registry::Registry`]; this module only records
//! the foreign element name.

use crate::error::ResolveError;
use surfview_schema::{
    node::{DisplayDescriptor, DisplayField, DisplayFieldRef},
    types::ElementName,
};

///
/// ResolvedField
///

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedField<'a> {
    /// The ref landed on a field declared by this descriptor.
    Local { field: &'a DisplayField },
    /// The ref names a sibling data type; resolution is deferred.
    Foreign { element: &'a ElementName, id: &'a str },
}

impl ResolvedField<'_> {
    #[must_use]
    pub const fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign { .. })
    }

    #[must_use]
    pub const fn field(&self) -> Option<&DisplayField> {
        match self {
            Self::Local { field } => Some(field),
            Self::Foreign { .. } => None,
        }
    }
}

/// Resolve a field ref in the context of one display version.
pub fn resolve_field<'a>(
    descriptor: &'a DisplayDescriptor,
    version_name: &str,
    field_ref: &'a DisplayFieldRef,
) -> Result<ResolvedField<'a>, ResolveError> {
    if descriptor.version(version_name).is_none() {
        return Err(ResolveError::UnknownVersion {
            element: descriptor.element.to_string(),
            version: version_name.to_string(),
        });
    }

    if let Some(element) = &field_ref.element_name {
        return Ok(ResolvedField::Foreign {
            element,
            id: &field_ref.id,
        });
    }

    descriptor
        .field(&field_ref.id)
        .map(|field| ResolvedField::Local { field })
        .ok_or_else(|| ResolveError::UnknownField {
            element: descriptor.element.to_string(),
            id: field_ref.id.clone(),
        })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_schema::xml;

    const DOC: &str = r#"
<Displays schema-element="fs:fsData" brief-description="FreeSurfer" full-description="FreeSurfer">
  <DisplayField id="EXPT_ID" header="ID" visible="true" searchable="true">
    <DisplayFieldElement name="Field1" schema-element="fs:fsData.ID"/>
  </DisplayField>
  <DisplayVersion versionName="listing">
    <DisplayFieldRef id="EXPT_ID"/>
    <DisplayFieldRef id="LABEL" element_name="xnat:mrSessionData"/>
  </DisplayVersion>
</Displays>
"#;

    #[test]
    fn local_ref_resolves_to_field() {
        let descriptor = xml::load(DOC).unwrap();
        let field_ref = &descriptor.version("listing").unwrap().fields[0];

        let resolved = resolve_field(&descriptor, "listing", field_ref).unwrap();
        assert!(!resolved.is_foreign());
        assert_eq!(resolved.field().unwrap().id, "EXPT_ID");
    }

    #[test]
    fn foreign_ref_is_recorded_not_resolved() {
        let descriptor = xml::load(DOC).unwrap();
        let field_ref = &descriptor.version("listing").unwrap().fields[1];

        let resolved = resolve_field(&descriptor, "listing", field_ref).unwrap();
        match resolved {
            ResolvedField::Foreign { element, id } => {
                assert_eq!(element.as_str(), "xnat:mrSessionData");
                assert_eq!(id, "LABEL");
            }
            ResolvedField::Local { .. } => panic!("expected foreign resolution"),
        }
    }

    #[test]
    fn unknown_version_is_rejected() {
        let descriptor = xml::load(DOC).unwrap();
        let field_ref = &descriptor.version("listing").unwrap().fields[0];

        let err = resolve_field(&descriptor, "detailed", field_ref).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownVersion {
                element: "fs:fsData".to_string(),
                version: "detailed".to_string(),
            }
        );
    }

    #[test]
    fn unknown_local_ref_is_rejected() {
        let descriptor = xml::load(DOC).unwrap();
        let stray = DisplayFieldRef {
            id: "MISSING".to_string(),
            element_name: None,
        };

        let err = resolve_field(&descriptor, "listing", &stray).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownField { .. }));
    }
}
