use crate::{MAX_VERSION_NAME_LEN, prelude::*};

///
/// DisplayVersion
///
/// A named, ordered presentation of the data type (`listing`, `full`, ...).
/// Field order is the display order; duplicate refs are legitimate
/// aliasing across element names and are never deduplicated.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayVersion {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_order_by: Option<String>,

    pub default_sort_order: SortOrder,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_color: Option<String>,

    pub fields: Vec<DisplayFieldRef>,
}

impl DisplayVersion {
    /// Referenced field ids in display order, duplicates included.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|r| r.id.as_str())
    }
}

impl ValidateNode for DisplayVersion {
    fn validate(&self, errs: &mut ErrorTree) {
        let route = format!("display_version.{}", self.name);

        if self.name.len() > MAX_VERSION_NAME_LEN {
            err!(
                errs,
                &route,
                "version name exceeds {MAX_VERSION_NAME_LEN} characters"
            );
        }

        if self.fields.is_empty() {
            err!(errs, &route, "version references no fields");
        }
    }
}

///
/// DisplayFieldRef
///
/// Reference to a display field; `element_name` marks a cross-entity ref
/// that is resolved by the caller against a sibling descriptor.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayFieldRef {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_name: Option<ElementName>,
}

impl DisplayFieldRef {
    #[must_use]
    pub const fn is_foreign(&self) -> bool {
        self.element_name.is_some()
    }
}

///
/// TESTS
///
