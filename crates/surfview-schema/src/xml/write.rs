//! Canonical descriptor serializer.
//!
//! Emits the same element and attribute vocabulary the reader accepts, so
//! `load(write(load(doc)))` equals `load(doc)` for every valid document.

use crate::node::{
    Arc, DisplayDescriptor, DisplayField, DisplayVersion, FieldBody, HtmlLink, Mapping,
    MappingColumn, SqlView, ViewLink,
};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Serialize a descriptor to its canonical document form.
#[must_use]
pub fn write(descriptor: &DisplayDescriptor) -> String {
    let mut out = String::new();

    out.push_str("<Displays");
    attr(&mut out, "schema-element", descriptor.element.as_str());
    attr(&mut out, "brief-description", &descriptor.brief_description);
    attr(&mut out, "full-description", &descriptor.full_description);
    out.push_str(">\n");

    for arc in &descriptor.arcs {
        write_arc(&mut out, arc);
    }
    for field in descriptor.fields.iter() {
        write_field(&mut out, field);
    }
    for version in &descriptor.versions {
        write_version(&mut out, version);
    }
    for view in &descriptor.sql_views {
        write_sql_view(&mut out, view);
    }
    for link in &descriptor.view_links {
        write_view_link(&mut out, link);
    }

    out.push_str("</Displays>\n");
    out
}

fn write_arc(out: &mut String, arc: &Arc) {
    out.push_str("  <Arc");
    attr(out, "name", &arc.name);
    out.push_str(">\n");

    for common in &arc.common_fields {
        out.push_str("    <CommonField");
        attr(out, "id", &common.id);
        attr(out, "local-field", &common.local_field);
        out.push_str("/>\n");
    }

    out.push_str("  </Arc>\n");
}

fn write_field(out: &mut String, field: &DisplayField) {
    let element = if field.is_sub_query() {
        "SubQueryField"
    } else {
        "DisplayField"
    };

    let _ = write!(out, "  <{element}");
    attr(out, "id", &field.id);
    attr(out, "header", &field.header);
    attr(out, "visible", bool_str(field.visible));
    attr(out, "searchable", bool_str(field.searchable));
    if let Some(data_type) = field.data_type {
        attr(out, "data-type", &data_type.to_string());
    }
    if field.image {
        attr(out, "image", "true");
    }
    out.push_str(">\n");

    match &field.body {
        FieldBody::Standard { elements, content } => {
            for source in elements {
                out.push_str("    <DisplayFieldElement");
                attr(out, "name", &source.name);
                match &source.source {
                    crate::node::FieldSource::SchemaElement(path) => {
                        attr(out, "schema-element", path);
                    }
                    crate::node::FieldSource::ViewColumn { view, column } => {
                        attr(out, "viewName", view);
                        attr(out, "viewColumn", column);
                    }
                }
                out.push_str("/>\n");
            }
            if let Some(content) = content {
                out.push_str("    <Content");
                attr(out, "type", &content.content_type);
                let _ = writeln!(out, ">{}</Content>", escape(content.template.as_str()));
            }
        }
        FieldBody::SubQuery(sub_query) => {
            let _ = writeln!(
                out,
                "    <SubQuery>{}</SubQuery>",
                escape(sub_query.query.as_str())
            );
            out.push_str("    <MappingColumns>\n");
            for column in &sub_query.mapping_columns {
                write_mapping_column(out, column, "      ");
            }
            out.push_str("    </MappingColumns>\n");
        }
    }

    if let Some(link) = &field.html_link {
        write_html_link(out, link);
    }

    let _ = writeln!(out, "  </{element}>");
}

fn write_html_link(out: &mut String, link: &HtmlLink) {
    out.push_str("    <HTML-Link>\n");

    for property in &link.properties {
        out.push_str("      <Property");
        attr(out, "name", &property.name);
        attr(out, "value", &property.value);
        if property.insert_values.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for insert in &property.insert_values {
                out.push_str("        <InsertValue");
                attr(out, "id", &insert.id);
                attr(out, "field", &insert.field);
                out.push_str("/>\n");
            }
            out.push_str("      </Property>\n");
        }
    }

    if let Some(secure) = &link.secure_link {
        out.push_str("      <SecureLink");
        attr(out, "elementName", secure.element_name.as_str());
        out.push_str(">\n");
        for value in &secure.values {
            out.push_str("        <securityMappingValue");
            attr(out, "displayFieldId", &value.display_field_id);
            attr(out, "schemaElementMap", &value.schema_element_map);
            out.push_str("/>\n");
        }
        out.push_str("      </SecureLink>\n");
    }

    out.push_str("    </HTML-Link>\n");
}

fn write_version(out: &mut String, version: &DisplayVersion) {
    out.push_str("  <DisplayVersion");
    attr(out, "versionName", &version.name);
    if let Some(order_by) = &version.default_order_by {
        attr(out, "default-order-by", order_by);
    }
    attr(
        out,
        "default-sort-order",
        &version.default_sort_order.to_string(),
    );
    if let Some(brief) = &version.brief_description {
        attr(out, "brief-description", brief);
    }
    if let Some(dark) = &version.dark_color {
        attr(out, "dark-color", dark);
    }
    if let Some(light) = &version.light_color {
        attr(out, "light-color", light);
    }
    out.push_str(">\n");

    for field_ref in &version.fields {
        out.push_str("    <DisplayFieldRef");
        attr(out, "id", &field_ref.id);
        if let Some(element) = &field_ref.element_name {
            attr(out, "element_name", element.as_str());
        }
        out.push_str("/>\n");
    }

    out.push_str("  </DisplayVersion>\n");
}

fn write_sql_view(out: &mut String, view: &SqlView) {
    out.push_str("  <SQLView");
    attr(out, "name", &view.name);
    attr(out, "sql", &view.sql);
    out.push_str("/>\n");
}

fn write_view_link(out: &mut String, link: &ViewLink) {
    out.push_str("  <ViewLink");
    attr(out, "alias", &link.alias);
    out.push_str(">\n");
    write_mapping(out, &link.mapping);
    out.push_str("  </ViewLink>\n");
}

fn write_mapping(out: &mut String, mapping: &Mapping) {
    out.push_str("    <Mapping");
    attr(out, "TableName", &mapping.table_name);
    if mapping.columns.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for column in &mapping.columns {
        write_mapping_column(out, column, "      ");
    }
    out.push_str("    </Mapping>\n");
}

fn write_mapping_column(out: &mut String, column: &MappingColumn, indent: &str) {
    out.push_str(indent);
    out.push_str("<MappingColumn");
    if let Some(root) = &column.root_element {
        attr(out, "rootElement", root.as_str());
    }
    attr(out, "fieldElement", &column.field_element);
    attr(out, "mapsTo", &column.maps_to);
    out.push_str("/>\n");
}

fn attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
