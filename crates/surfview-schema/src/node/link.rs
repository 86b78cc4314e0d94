use crate::prelude::*;

///
/// HtmlLink
///
/// Hyperlink decoration for a display field: templated properties
/// (`HREF`, `ONCLICK`, `TITLE`) plus an optional access-control mapping.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HtmlLink {
    pub properties: Vec<LinkProperty>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_link: Option<SecureLink>,
}

impl HtmlLink {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&LinkProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl ValidateNode for HtmlLink {
    fn validate(&self, errs: &mut ErrorTree) {
        for (i, property) in self.properties.iter().enumerate() {
            if self.properties[..i].iter().any(|p| p.name == property.name) {
                err!(
                    errs,
                    "html_link",
                    "duplicate link property '{}'",
                    property.name
                );
            }
        }
    }
}

///
/// LinkProperty
///
/// One templated link property. `insert_values` binds each `@id`
/// placeholder in the value template to a display field, in order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkProperty {
    pub name: String,
    pub value: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insert_values: Vec<InsertValue>,
}

///
/// InsertValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsertValue {
    pub id: String,
    pub field: String,
}

///
/// SecureLink
///
/// Access-control hook: the named element owns the permission check, and
/// each value pairs a local display field with the security expression the
/// rendering layer evaluates against it. Order is significant.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SecureLink {
    pub element_name: ElementName,
    pub values: Vec<SecureLinkValue>,
}

///
/// SecureLinkValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SecureLinkValue {
    pub display_field_id: String,
    pub schema_element_map: String,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn onclick_link() -> HtmlLink {
        HtmlLink {
            properties: vec![
                LinkProperty {
                    name: "HREF".to_string(),
                    value: "none".to_string(),
                    insert_values: vec![],
                },
                LinkProperty {
                    name: "ONCLICK".to_string(),
                    value: "return rpt:showItem('@Field1');".to_string(),
                    insert_values: vec![InsertValue {
                        id: "Field1".to_string(),
                        field: "EXPT_ID".to_string(),
                    }],
                },
            ],
            secure_link: None,
        }
    }

    #[test]
    fn property_lookup() {
        let link = onclick_link();
        assert_eq!(link.property("HREF").unwrap().value, "none");
        assert!(link.property("TITLE").is_none());
    }

    #[test]
    fn duplicate_property_names_rejected() {
        let mut link = onclick_link();
        link.properties.push(LinkProperty {
            name: "HREF".to_string(),
            value: "other".to_string(),
            insert_values: vec![],
        });

        let mut errs = ErrorTree::new();
        link.validate(&mut errs);
        assert_eq!(errs.len(), 1);
    }
}
