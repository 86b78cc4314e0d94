use crate::prelude::*;

///
/// DisplayDescriptor
///
/// Root entity: one data type's complete presentation metadata. Built once
/// by `xml::load` and immutable afterwards; safe to share read-only.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayDescriptor {
    pub element: ElementName,
    pub brief_description: String,
    pub full_description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arcs: Vec<Arc>,

    pub fields: DisplayFieldList,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<DisplayVersion>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub view_links: Vec<ViewLink>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sql_views: Vec<SqlView>,
}

impl DisplayDescriptor {
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&DisplayField> {
        self.fields.get(id)
    }

    #[must_use]
    pub fn version(&self, name: &str) -> Option<&DisplayVersion> {
        self.versions.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn arc(&self, name: &str) -> Option<&Arc> {
        self.arcs.iter().find(|a| a.name == name)
    }

    #[must_use]
    pub fn sql_view(&self, name: &str) -> Option<&SqlView> {
        self.sql_views.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn view_link(&self, alias: &str) -> Option<&ViewLink> {
        self.view_links.iter().find(|v| v.alias == alias)
    }

    /// Whether any version references the field id as a local field.
    /// Foreign refs with the same id belong to a sibling descriptor.
    #[must_use]
    pub fn is_referenced(&self, id: &str) -> bool {
        self.versions
            .iter()
            .flat_map(|v| v.fields.iter())
            .any(|r| r.id == id && !r.is_foreign())
    }
}

impl ValidateNode for DisplayDescriptor {
    fn validate(&self, errs: &mut ErrorTree) {
        for (i, version) in self.versions.iter().enumerate() {
            if self.versions[..i].iter().any(|v| v.name == version.name) {
                err!(
                    errs,
                    "displays",
                    "duplicate display version '{}'",
                    version.name
                );
            }
        }

        for (i, arc) in self.arcs.iter().enumerate() {
            if self.arcs[..i].iter().any(|a| a.name == arc.name) {
                err!(errs, "displays", "duplicate arc '{}'", arc.name);
            }
        }

        for (i, view) in self.sql_views.iter().enumerate() {
            if self.sql_views[..i].iter().any(|v| v.name == view.name) {
                err!(errs, "displays", "duplicate sql view '{}'", view.name);
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> DisplayDescriptor {
        DisplayDescriptor {
            element: ElementName::parse("fs:fsData").unwrap(),
            brief_description: "FreeSurfer".to_string(),
            full_description: "FreeSurfer".to_string(),
            arcs: vec![],
            fields: DisplayFieldList::default(),
            versions: vec![
                DisplayVersion {
                    name: "listing".to_string(),
                    default_order_by: None,
                    default_sort_order: SortOrder::Asc,
                    brief_description: None,
                    dark_color: None,
                    light_color: None,
                    fields: vec![DisplayFieldRef {
                        id: "EXPT_ID".to_string(),
                        element_name: None,
                    }],
                },
            ],
            view_links: vec![],
            sql_views: vec![],
        }
    }

    #[test]
    fn version_lookup() {
        let desc = descriptor();
        assert!(desc.version("listing").is_some());
        assert!(desc.version("full").is_none());
    }

    #[test]
    fn referenced_fields_are_detected() {
        let desc = descriptor();
        assert!(desc.is_referenced("EXPT_ID"));
        assert!(!desc.is_referenced("LABEL"));
    }

    #[test]
    fn duplicate_version_names_rejected() {
        let mut desc = descriptor();
        desc.versions.push(desc.versions[0].clone());

        let mut errs = ErrorTree::new();
        desc.validate(&mut errs);
        assert_eq!(errs.len(), 1);
    }
}
