//! Option tree validation utilities

use std::collections::HashSet;

use thiserror::Error;

use super::option::CascadeOption;

/// Maximum number of levels in an option tree and in a selection path
pub const MAX_DEPTH: usize = 3;

/// Validation errors for option trees
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CascadeValidationError {
    #[error("Option value cannot be empty")]
    EmptyValue,

    #[error("Duplicate option value '{value}' under '{parent}'")]
    DuplicateSibling { parent: String, value: String },

    #[error("Option tree exceeds maximum depth of {0} levels")]
    TooDeep(usize),
}

/// Validate a forest of root options.
///
/// Values must be unique among siblings only; the same value may appear under different
/// parents.
pub fn validate_options(roots: &[CascadeOption]) -> Result<(), CascadeValidationError> {
    validate_level(roots, "<root>", 1)
}

fn validate_level(
    options: &[CascadeOption],
    parent: &str,
    depth: usize,
) -> Result<(), CascadeValidationError> {
    if !options.is_empty() && depth > MAX_DEPTH {
        return Err(CascadeValidationError::TooDeep(MAX_DEPTH));
    }

    let mut seen = HashSet::with_capacity(options.len());

    for option in options {
        if option.value().trim().is_empty() {
            return Err(CascadeValidationError::EmptyValue);
        }

        if !seen.insert(option.value()) {
            return Err(CascadeValidationError::DuplicateSibling {
                parent: parent.to_string(),
                value: option.value().to_string(),
            });
        }

        validate_level(option.children(), option.value(), depth + 1)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: &str) -> CascadeOption {
        CascadeOption::new(value, value)
    }

    #[test]
    fn test_valid_tree() {
        let roots = vec![
            CascadeOption::new("east", "East").with_children(vec![
                CascadeOption::new("co-a", "Company A").with_children(vec![leaf("s1"), leaf("s2")]),
            ]),
            leaf("west"),
        ];

        assert!(validate_options(&roots).is_ok());
    }

    #[test]
    fn test_empty_forest_is_valid() {
        assert!(validate_options(&[]).is_ok());
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(
            validate_options(&[leaf(" ")]),
            Err(CascadeValidationError::EmptyValue)
        );
    }

    #[test]
    fn test_duplicate_root_values() {
        assert_eq!(
            validate_options(&[leaf("east"), leaf("east")]),
            Err(CascadeValidationError::DuplicateSibling {
                parent: "<root>".to_string(),
                value: "east".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_children() {
        let roots = vec![CascadeOption::new("east", "East").with_children(vec![leaf("a"), leaf("a")])];

        assert_eq!(
            validate_options(&roots),
            Err(CascadeValidationError::DuplicateSibling {
                parent: "east".to_string(),
                value: "a".to_string(),
            })
        );
    }

    #[test]
    fn test_same_value_under_different_parents() {
        let roots = vec![
            CascadeOption::new("co-a", "A").with_children(vec![leaf("airport")]),
            CascadeOption::new("co-b", "B").with_children(vec![leaf("airport")]),
        ];

        assert!(validate_options(&roots).is_ok());
    }

    #[test]
    fn test_too_deep() {
        let roots = vec![CascadeOption::new("l1", "L1").with_children(vec![
            CascadeOption::new("l2", "L2").with_children(vec![
                CascadeOption::new("l3", "L3").with_children(vec![leaf("l4")]),
            ]),
        ])];

        assert_eq!(
            validate_options(&roots),
            Err(CascadeValidationError::TooDeep(3))
        );
    }

    #[test]
    fn test_empty_children_at_max_depth_is_valid() {
        let roots = vec![CascadeOption::new("l1", "L1").with_children(vec![
            CascadeOption::new("l2", "L2").with_children(vec![
                CascadeOption::new("l3", "L3").with_children(vec![]),
            ]),
        ])];

        assert!(validate_options(&roots).is_ok());
    }
}
