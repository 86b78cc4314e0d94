use crate::prelude::*;

///
/// SqlView
///
/// A named derived relation backed by a literal query. The query is an
/// opaque payload handed to the rendering layer's query engine.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SqlView {
    pub name: String,
    pub sql: String,
}

impl ValidateNode for SqlView {
    fn validate(&self, errs: &mut ErrorTree) {
        if self.sql.trim().is_empty() {
            err!(errs, format!("sql_view.{}", self.name), "empty view query");
        }
    }
}

///
/// ViewLink
///
/// Binds a derived relation into this descriptor: the mapping pairs the
/// owning data type's key with the relation's key column so field elements
/// can source values from the view.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewLink {
    pub alias: String,
    pub mapping: Mapping,
}

impl ValidateNode for ViewLink {
    fn validate(&self, errs: &mut ErrorTree) {
        if self.mapping.columns.is_empty() {
            err!(
                errs,
                format!("view_link.{}", self.alias),
                "mapping declares no columns"
            );
        }
    }
}

///
/// Mapping
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mapping {
    pub table_name: String,
    pub columns: Vec<MappingColumn>,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_query_is_rejected() {
        let view = SqlView {
            name: "snap_view".to_string(),
            sql: "  ".to_string(),
        };

        let mut errs = ErrorTree::new();
        view.validate(&mut errs);
        assert!(!errs.is_empty());
    }

    #[test]
    fn view_link_requires_mapping_columns() {
        let link = ViewLink {
            alias: "snap_view".to_string(),
            mapping: Mapping {
                table_name: "snap_view".to_string(),
                columns: vec![],
            },
        };

        let mut errs = ErrorTree::new();
        link.validate(&mut errs);
        assert!(!errs.is_empty());
    }
}
