use crate::{
    err,
    error::ErrorTree,
    node::{DisplayDescriptor, FieldBody, FieldSource},
};
use std::collections::BTreeMap;

/// Every display field id must be unique within the descriptor.
pub fn validate_field_ids(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();

    for field in descriptor.fields.iter() {
        *seen.entry(field.id.as_str()).or_default() += 1;
    }

    for (id, count) in seen {
        if count > 1 {
            err!(
                errs,
                format!("display_field.{id}"),
                "display field id declared {count} times"
            );
        }
    }
}

/// Local version refs must resolve, and a resolved field must have
/// something to render from (the lazy-field rule).
pub fn validate_version_refs(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    for version in &descriptor.versions {
        let route = format!("display_version.{}", version.name);

        for field_ref in &version.fields {
            // Foreign refs resolve against a sibling descriptor; only the
            // element name is recorded here.
            if field_ref.is_foreign() {
                continue;
            }

            match descriptor.field(&field_ref.id) {
                None => {
                    err!(
                        errs,
                        &route,
                        "field ref '{}' has no matching display field",
                        field_ref.id
                    );
                }
                Some(field) if field.is_lazy() => {
                    err!(
                        errs,
                        &route,
                        "field ref '{}' targets a field with no elements and no content",
                        field_ref.id
                    );
                }
                Some(_) => {}
            }
        }

        if let Some(order_by) = &version.default_order_by
            && descriptor.field(order_by).is_none()
        {
            err!(
                errs,
                &route,
                "default-order-by '{order_by}' has no matching display field"
            );
        }
    }
}

/// Arc mappings must land on declared display fields.
pub fn validate_arc_refs(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    for arc in &descriptor.arcs {
        for common in &arc.common_fields {
            if descriptor.field(&common.local_field).is_none() {
                err!(
                    errs,
                    format!("arc.{}", arc.name),
                    "common field '{}' maps to undeclared display field '{}'",
                    common.id,
                    common.local_field
                );
            }
        }
    }
}

/// HTML-Link bindings and secure-link values must land on declared fields.
pub fn validate_link_refs(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    for field in descriptor.fields.iter() {
        let Some(link) = &field.html_link else {
            continue;
        };
        let route = format!("display_field.{}.html_link", field.id);

        for property in &link.properties {
            for insert in &property.insert_values {
                if descriptor.field(&insert.field).is_none() {
                    err!(
                        errs,
                        &route,
                        "insert value '{}' binds undeclared display field '{}'",
                        insert.id,
                        insert.field
                    );
                }
            }
        }

        if let Some(secure) = &link.secure_link {
            for value in &secure.values {
                if descriptor.field(&value.display_field_id).is_none() {
                    err!(
                        errs,
                        &route,
                        "secure link references undeclared display field '{}'",
                        value.display_field_id
                    );
                }
            }
        }
    }
}

/// View-backed sources and view links must agree with declared SQL views,
/// and view-link mappings must stay under the descriptor's root element.
pub fn validate_view_refs(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    for field in descriptor.fields.iter() {
        let FieldBody::Standard { elements, .. } = &field.body else {
            continue;
        };
        for element in elements {
            if let FieldSource::ViewColumn { view, .. } = &element.source
                && descriptor.sql_view(view).is_none()
            {
                err!(
                    errs,
                    format!("display_field.{}", field.id),
                    "element '{}' references undeclared view '{view}'",
                    element.name
                );
            }
        }
    }

    let root_prefix = format!("{}.", descriptor.element);
    for link in &descriptor.view_links {
        let route = format!("view_link.{}", link.alias);

        if descriptor.sql_view(&link.mapping.table_name).is_none() {
            err!(
                errs,
                &route,
                "mapping table '{}' has no matching sql view",
                link.mapping.table_name
            );
        }

        for column in &link.mapping.columns {
            if let Some(root) = &column.root_element
                && root != &descriptor.element
            {
                err!(
                    errs,
                    &route,
                    "mapping column root '{root}' does not match descriptor element '{}'",
                    descriptor.element
                );
            }
            if !column.field_element.starts_with(&root_prefix) {
                err!(
                    errs,
                    &route,
                    "mapping column '{}' does not live under element '{}'",
                    column.field_element,
                    descriptor.element
                );
            }
        }
    }
}

/// Subquery mapping columns must pair declared display fields with result
/// columns.
pub fn validate_subquery_mappings(descriptor: &DisplayDescriptor, errs: &mut ErrorTree) {
    for field in descriptor.fields.iter() {
        let FieldBody::SubQuery(sub_query) = &field.body else {
            continue;
        };

        for column in &sub_query.mapping_columns {
            if descriptor.field(&column.field_element).is_none() {
                err!(
                    errs,
                    format!("display_field.{}", field.id),
                    "mapping column references undeclared display field '{}'",
                    column.field_element
                );
            }
        }
    }
}
