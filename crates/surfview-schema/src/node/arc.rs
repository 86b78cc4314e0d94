use crate::prelude::*;

///
/// Arc
///
/// A named join path onto a related data type. Each common field id is a
/// platform-wide identifier; the mapping says which local display field
/// carries it for this descriptor.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Arc {
    pub name: String,
    pub common_fields: Vec<CommonField>,
}

impl Arc {
    /// Local display field id bound to a common field id, if mapped.
    #[must_use]
    pub fn local_field(&self, common_id: &str) -> Option<&str> {
        self.common_fields
            .iter()
            .find(|c| c.id == common_id)
            .map(|c| c.local_field.as_str())
    }
}

impl ValidateNode for Arc {
    fn validate(&self, errs: &mut ErrorTree) {
        let route = format!("arc.{}", self.name);

        if self.common_fields.is_empty() {
            err!(errs, &route, "arc maps no common fields");
        }

        for (i, common) in self.common_fields.iter().enumerate() {
            if self.common_fields[..i].iter().any(|c| c.id == common.id) {
                err!(errs, &route, "duplicate common field id '{}'", common.id);
            }
        }
    }
}

///
/// CommonField
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommonField {
    pub id: String,
    pub local_field: String,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn assessor_arc() -> Arc {
        Arc {
            name: "ASSESSOR".to_string(),
            common_fields: vec![
                CommonField {
                    id: "EXPT_ID".to_string(),
                    local_field: "SESSION_ID".to_string(),
                },
                CommonField {
                    id: "PART_ID".to_string(),
                    local_field: "SUBJECT_ID".to_string(),
                },
            ],
        }
    }

    #[test]
    fn local_field_lookup() {
        let arc = assessor_arc();
        assert_eq!(arc.local_field("EXPT_ID"), Some("SESSION_ID"));
        assert_eq!(arc.local_field("PROJ_ID"), None);
    }

    #[test]
    fn duplicate_common_id_is_rejected() {
        let mut arc = assessor_arc();
        arc.common_fields.push(CommonField {
            id: "EXPT_ID".to_string(),
            local_field: "OTHER".to_string(),
        });

        let mut errs = ErrorTree::new();
        arc.validate(&mut errs);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn empty_arc_is_rejected() {
        let arc = Arc {
            name: "EMPTY".to_string(),
            common_fields: vec![],
        };

        let mut errs = ErrorTree::new();
        arc.validate(&mut errs);
        assert!(!errs.is_empty());
    }
}
