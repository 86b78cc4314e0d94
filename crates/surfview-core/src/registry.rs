//! Descriptor registry: the caller-side half of cross-entity resolution.
//!
//! Descriptor documents may load in any order, so linking is two-phase:
//! parse and insert every descriptor first, then `link` verifies all
//! foreign refs against their sibling descriptors at once.

use crate::{
    error::{RegistryError, ResolveError},
    resolve::{ResolvedField, resolve_field},
};
use std::collections::BTreeMap;
use surfview_schema::{
    err,
    error::ErrorTree,
    node::{DisplayDescriptor, DisplayField, DisplayFieldRef},
};

///
/// Registry
///

#[derive(Debug, Default)]
pub struct Registry {
    descriptors: BTreeMap<String, DisplayDescriptor>,
}

impl Registry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register a parsed descriptor under its target element name.
    pub fn insert(&mut self, descriptor: DisplayDescriptor) -> Result<(), RegistryError> {
        let element = descriptor.element.to_string();

        if self.descriptors.contains_key(&element) {
            return Err(RegistryError::DuplicateDescriptor { element });
        }
        self.descriptors.insert(element, descriptor);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, element: &str) -> Option<&DisplayDescriptor> {
        self.descriptors.get(element)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayDescriptor> {
        self.descriptors.values()
    }

    /// Verify every foreign field ref against its sibling descriptor.
    ///
    /// All violations are aggregated; a registry that links once stays
    /// linked, since descriptors are immutable.
    pub fn link(&self) -> Result<(), RegistryError> {
        let mut errs = ErrorTree::new();

        for descriptor in self.descriptors.values() {
            for version in &descriptor.versions {
                let route = format!("{}.{}", descriptor.element, version.name);

                for field_ref in &version.fields {
                    let Some(element) = &field_ref.element_name else {
                        continue;
                    };

                    match self.descriptors.get(element.as_str()) {
                        None => {
                            err!(
                                errs,
                                &route,
                                "field ref '{}' names unregistered element '{element}'",
                                field_ref.id
                            );
                        }
                        Some(sibling) if sibling.field(&field_ref.id).is_none() => {
                            err!(
                                errs,
                                &route,
                                "field ref '{}' is not declared by element '{element}'",
                                field_ref.id
                            );
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        errs.result().map_err(RegistryError::Link)
    }

    /// Resolve a field ref to its defining descriptor and field, chasing
    /// foreign refs through the registry.
    pub fn resolve_field<'a>(
        &'a self,
        element: &str,
        version_name: &str,
        field_ref: &'a DisplayFieldRef,
    ) -> Result<(&'a DisplayDescriptor, &'a DisplayField), ResolveError> {
        let descriptor = self
            .get(element)
            .ok_or_else(|| ResolveError::UnknownDescriptor {
                element: element.to_string(),
            })?;

        match resolve_field(descriptor, version_name, field_ref)? {
            ResolvedField::Local { field } => Ok((descriptor, field)),
            ResolvedField::Foreign { element, id } => {
                let sibling =
                    self.get(element.as_str())
                        .ok_or_else(|| ResolveError::UnknownDescriptor {
                            element: element.to_string(),
                        })?;
                let field = sibling
                    .field(id)
                    .ok_or_else(|| ResolveError::UnknownField {
                        element: element.to_string(),
                        id: id.to_string(),
                    })?;

                Ok((sibling, field))
            }
        }
    }
}
