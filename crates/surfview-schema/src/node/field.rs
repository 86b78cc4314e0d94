use crate::{MAX_FIELD_ID_LEN, prelude::*};
use std::ops::Not;

///
/// DisplayFieldList
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DisplayFieldList {
    pub fields: Vec<DisplayField>,
}

impl DisplayFieldList {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DisplayField> {
        self.fields.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayField> {
        self.fields.iter()
    }
}

///
/// DisplayField
///
/// One renderable/searchable column. `SubQueryField` on the wire is the
/// same node with a [`FieldBody::SubQuery`] body.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayField {
    pub id: String,
    pub header: String,
    pub visible: bool,
    pub searchable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,

    #[serde(skip_serializing_if = "Not::not")]
    pub image: bool,

    pub body: FieldBody,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<HtmlLink>,
}

impl DisplayField {
    #[must_use]
    pub const fn is_sub_query(&self) -> bool {
        matches!(self.body, FieldBody::SubQuery(_))
    }

    /// A lazy field has nothing to render from: no source elements and no
    /// computed content. It is legal only while no version references it.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        match &self.body {
            FieldBody::Standard { elements, content } => {
                elements.is_empty() && content.is_none()
            }
            FieldBody::SubQuery(_) => false,
        }
    }

    /// Source element bound under a placeholder name (`Field1`, ...).
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&FieldElement> {
        match &self.body {
            FieldBody::Standard { elements, .. } => elements.iter().find(|e| e.name == name),
            FieldBody::SubQuery(_) => None,
        }
    }
}

impl ValidateNode for DisplayField {
    fn validate(&self, errs: &mut ErrorTree) {
        let route = format!("display_field.{}", self.id);

        if self.id.len() > MAX_FIELD_ID_LEN {
            err!(
                errs,
                &route,
                "field id exceeds {MAX_FIELD_ID_LEN} characters"
            );
        }

        match &self.body {
            FieldBody::Standard { elements, .. } => {
                for (i, element) in elements.iter().enumerate() {
                    if elements[..i].iter().any(|e| e.name == element.name) {
                        err!(errs, &route, "duplicate element name '{}'", element.name);
                    }
                }
            }
            FieldBody::SubQuery(sub_query) => {
                // The rendering layer joins the subquery in via @WHERE.
                if !sub_query.query.contains("@WHERE") {
                    err!(errs, &route, "subquery carries no '@WHERE' placeholder");
                }
                if sub_query.mapping_columns.is_empty() {
                    err!(errs, &route, "subquery declares no mapping columns");
                }
            }
        }
    }
}

///
/// FieldBody
///
/// What a field renders from: direct source elements with an optional
/// computed content template, or an embedded parameterized subquery.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FieldBody {
    Standard {
        elements: Vec<FieldElement>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
    },
    SubQuery(SubQuery),
}

///
/// FieldElement
///
/// One value source, addressable from templates by its binding name.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldElement {
    pub name: String,
    pub source: FieldSource,
}

///
/// FieldSource
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FieldSource {
    /// Direct reference into the data type's schema, e.g. `fs:fsData.ID`.
    SchemaElement(String),
    /// Reference into a named derived relation's column.
    ViewColumn { view: String, column: String },
}

///
/// Content
///
/// Computed formula over the field's elements. The payload is opaque to
/// this crate; only `@FieldN` placeholders are meaningful.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Content {
    pub content_type: String,
    pub template: String,
}

///
/// SubQuery
///
/// Parameterized query template joined in through the `@WHERE` placeholder
/// plus the key mapping onto its result columns.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubQuery {
    pub query: String,
    pub mapping_columns: Vec<MappingColumn>,
}

///
/// MappingColumn
///
/// Key mapping entry. Subquery mappings pair a local display field id with
/// a result column; view-link mappings additionally pin the root element.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MappingColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_element: Option<ElementName>,
    pub field_element: String,
    pub maps_to: String,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_field(id: &str) -> DisplayField {
        DisplayField {
            id: id.to_string(),
            header: "Header".to_string(),
            visible: true,
            searchable: false,
            data_type: None,
            image: false,
            body: FieldBody::Standard {
                elements: vec![FieldElement {
                    name: "Field1".to_string(),
                    source: FieldSource::SchemaElement("fs:fsData.ID".to_string()),
                }],
                content: None,
            },
            html_link: None,
        }
    }

    #[test]
    fn element_lookup_by_binding_name() {
        let field = standard_field("EXPT_ID");
        assert!(field.element("Field1").is_some());
        assert!(field.element("Field2").is_none());
        assert!(!field.is_lazy());
        assert!(!field.is_sub_query());
    }

    #[test]
    fn lazy_field_detection() {
        let mut field = standard_field("LAZY");
        field.body = FieldBody::Standard {
            elements: vec![],
            content: None,
        };
        assert!(field.is_lazy());

        field.body = FieldBody::Standard {
            elements: vec![],
            content: Some(Content {
                content_type: "sql".to_string(),
                template: "'constant'".to_string(),
            }),
        };
        assert!(!field.is_lazy());
    }

    #[test]
    fn duplicate_element_names_rejected() {
        let mut field = standard_field("EXPT_ID");
        if let FieldBody::Standard { elements, .. } = &mut field.body {
            elements.push(FieldElement {
                name: "Field1".to_string(),
                source: FieldSource::SchemaElement("fs:fsData.label".to_string()),
            });
        }

        let mut errs = ErrorTree::new();
        field.validate(&mut errs);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn subquery_requires_where_placeholder() {
        let mut field = standard_field("PROJECTS");
        field.body = FieldBody::SubQuery(SubQuery {
            query: "SELECT id, project FROM shares".to_string(),
            mapping_columns: vec![MappingColumn {
                root_element: None,
                field_element: "EXPT_ID".to_string(),
                maps_to: "id".to_string(),
            }],
        });

        let mut errs = ErrorTree::new();
        field.validate(&mut errs);
        assert_eq!(errs.len(), 1);
        assert!(errs.to_string().contains("@WHERE"));
    }

    #[test]
    fn subquery_fields_are_never_lazy() {
        let mut field = standard_field("PROJECTS");
        field.body = FieldBody::SubQuery(SubQuery {
            query: "SELECT id FROM shares WHERE @WHERE".to_string(),
            mapping_columns: vec![],
        });
        assert!(!field.is_lazy());
        assert!(field.is_sub_query());
    }
}
