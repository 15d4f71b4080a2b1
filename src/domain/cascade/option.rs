//! Option tree entities

use serde::{Deserialize, Serialize};

use super::validation::{validate_options, CascadeValidationError};
use crate::domain::DomainError;

// ============================================================================
// CascadeOption
// ============================================================================

/// A node in a fixed option tree (region, company or site)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOption {
    value: String,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<CascadeOption>>,
}

impl CascadeOption {
    /// Create a leaf option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            children: None,
        }
    }

    /// Set the children of this option
    pub fn with_children(mut self, children: Vec<CascadeOption>) -> Self {
        self.children = Some(children);
        self
    }

    /// Append a single child
    pub fn with_child(mut self, child: CascadeOption) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Children in declaration order; empty for leaves
    pub fn children(&self) -> &[CascadeOption] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// True when the option has no children field or an empty one
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Find a direct child by value
    pub fn child(&self, value: &str) -> Option<&CascadeOption> {
        find_option(self.children(), value)
    }
}

pub(crate) fn find_option<'a>(options: &'a [CascadeOption], value: &str) -> Option<&'a CascadeOption> {
    options.iter().find(|option| option.value() == value)
}

// ============================================================================
// OptionTree
// ============================================================================

/// A validated, read-only forest of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CascadeOption>", into = "Vec<CascadeOption>")]
pub struct OptionTree {
    roots: Vec<CascadeOption>,
}

impl OptionTree {
    /// Build a tree from its root options
    pub fn new(roots: Vec<CascadeOption>) -> Result<Self, CascadeValidationError> {
        validate_options(&roots)?;
        Ok(Self { roots })
    }

    /// Parse a tree from its JSON representation (an array of root options)
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("Invalid option tree: {}", e)))
    }

    pub fn roots(&self) -> &[CascadeOption] {
        &self.roots
    }

    /// Walk the tree following `path` and return every option reached, root first.
    ///
    /// The walk stops at the first segment that is not a child of the previous option.
    pub fn resolve_chain<S: AsRef<str>>(&self, path: &[S]) -> Vec<&CascadeOption> {
        let mut chain = Vec::with_capacity(path.len());
        let mut level = self.roots.as_slice();

        for segment in path {
            match find_option(level, segment.as_ref()) {
                Some(option) => {
                    chain.push(option);
                    level = option.children();
                }
                None => break,
            }
        }

        chain
    }

    /// Deepest option reached by following `path`
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&CascadeOption> {
        self.resolve_chain(path).pop()
    }
}

impl TryFrom<Vec<CascadeOption>> for OptionTree {
    type Error = CascadeValidationError;

    fn try_from(value: Vec<CascadeOption>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionTree> for Vec<CascadeOption> {
    fn from(tree: OptionTree) -> Self {
        tree.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> OptionTree {
        OptionTree::new(vec![
            CascadeOption::new("east", "East Region").with_children(vec![
                CascadeOption::new("co-a", "Company A")
                    .with_child(CascadeOption::new("pvg", "Pudong"))
                    .with_child(CascadeOption::new("sha", "Hongqiao")),
                CascadeOption::new("co-b", "Company B")
                    .with_child(CascadeOption::new("pvg", "Pudong")),
            ]),
            CascadeOption::new("north", "North Region"),
        ])
        .unwrap()
    }

    mod cascade_option_tests {
        use super::*;

        #[test]
        fn test_leaf_without_children_field() {
            assert!(CascadeOption::new("x", "X").is_leaf());
        }

        #[test]
        fn test_leaf_with_empty_children() {
            assert!(CascadeOption::new("x", "X").with_children(vec![]).is_leaf());
        }

        #[test]
        fn test_internal_node_is_not_leaf() {
            let option = CascadeOption::new("x", "X").with_child(CascadeOption::new("y", "Y"));
            assert!(!option.is_leaf());
        }

        #[test]
        fn test_child_lookup() {
            let tree = sample_tree();
            let east = &tree.roots()[0];

            assert_eq!(east.child("co-b").unwrap().label(), "Company B");
            assert!(east.child("missing").is_none());
        }

        #[test]
        fn test_leaf_serialization_omits_children() {
            let json = serde_json::to_string(&CascadeOption::new("pvg", "Pudong")).unwrap();
            assert_eq!(json, r#"{"value":"pvg","label":"Pudong"}"#);
        }
    }

    mod option_tree_tests {
        use super::*;

        #[test]
        fn test_resolve_full_path() {
            let tree = sample_tree();
            let option = tree.resolve(&["east", "co-a", "sha"]).unwrap();
            assert_eq!(option.label(), "Hongqiao");
        }

        #[test]
        fn test_resolve_partial_path() {
            let tree = sample_tree();
            assert_eq!(tree.resolve(&["east"]).unwrap().value(), "east");
        }

        #[test]
        fn test_resolve_degrades_on_invalid_tail() {
            let tree = sample_tree();
            let option = tree.resolve(&["east", "co-b", "sha"]).unwrap();
            assert_eq!(option.value(), "co-b");
        }

        #[test]
        fn test_resolve_stops_at_first_invalid_segment() {
            let tree = sample_tree();
            let option = tree.resolve(&["east", "nope", "pvg"]).unwrap();
            assert_eq!(option.value(), "east");
        }

        #[test]
        fn test_resolve_empty_or_unknown_root() {
            let tree = sample_tree();
            let empty: [&str; 0] = [];

            assert!(tree.resolve(&empty).is_none());
            assert!(tree.resolve(&["south"]).is_none());
        }

        #[test]
        fn test_resolve_chain_labels() {
            let tree = sample_tree();
            let labels: Vec<&str> = tree
                .resolve_chain(&["east", "co-b", "pvg"])
                .iter()
                .map(|o| o.label())
                .collect();

            assert_eq!(labels, vec!["East Region", "Company B", "Pudong"]);
        }

        #[test]
        fn test_from_json() {
            let json = r#"[
                {"value": "east", "label": "East", "children": [
                    {"value": "co-a", "label": "A", "children": [{"value": "pvg", "label": "Pudong"}]}
                ]}
            ]"#;

            let tree = OptionTree::from_json(json).unwrap();
            assert_eq!(tree.resolve(&["east", "co-a", "pvg"]).unwrap().label(), "Pudong");
        }

        #[test]
        fn test_from_json_rejects_duplicate_siblings() {
            let json = r#"[{"value": "east", "label": "E"}, {"value": "east", "label": "E2"}]"#;

            let result = OptionTree::from_json(json);
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }

        #[test]
        fn test_serialization_is_root_array() {
            let tree = OptionTree::new(vec![CascadeOption::new("north", "North")]).unwrap();
            let json = serde_json::to_string(&tree).unwrap();
            assert_eq!(json, r#"[{"value":"north","label":"North"}]"#);
        }
    }
}
