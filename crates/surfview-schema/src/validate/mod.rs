//! Descriptor validation orchestration and shared helpers.

pub mod refs;

use crate::{
    error::ErrorTree,
    node::{DisplayDescriptor, ValidateNode},
};

/// Run full descriptor validation in a staged, deterministic order.
pub(crate) fn validate_descriptor(descriptor: &DisplayDescriptor) -> Result<(), ErrorTree> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(descriptor);

    // Phase 2: enforce descriptor-wide invariants.
    validate_global(descriptor, &mut errors);

    errors.result()
}

// Validate every node in document order so aggregated routes stay stable.
fn validate_nodes(descriptor: &DisplayDescriptor) -> ErrorTree {
    let mut errors = ErrorTree::new();

    descriptor.validate(&mut errors);

    for arc in &descriptor.arcs {
        arc.validate(&mut errors);
    }

    for field in descriptor.fields.iter() {
        field.validate(&mut errors);
        if let Some(link) = &field.html_link {
            link.validate(&mut errors);
        }
    }

    for version in &descriptor.versions {
        version.validate(&mut errors);
    }

    for view in &descriptor.sql_views {
        view.validate(&mut errors);
    }

    for link in &descriptor.view_links {
        link.validate(&mut errors);
    }

    errors
}

// Run global validation passes that require a full descriptor view.
fn validate_global(descriptor: &DisplayDescriptor, errors: &mut ErrorTree) {
    refs::validate_field_ids(descriptor, errors);
    refs::validate_version_refs(descriptor, errors);
    refs::validate_arc_refs(descriptor, errors);
    refs::validate_link_refs(descriptor, errors);
    refs::validate_view_refs(descriptor, errors);
    refs::validate_subquery_mappings(descriptor, errors);
}
