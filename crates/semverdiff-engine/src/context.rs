//! Validated comparison context shared by every comparer stage

use crate::error::CompareError;
use regex::Regex;
use semverdiff_core::{AttributeCompareMode, AttributeDefinition, ComparerOptions, ItemRef, MessageEvent};

/// Options plus the state derived from them once per run
///
/// Attribute name patterns are compiled exactly once here; an unusable
/// option set is rejected before any matching starts.
#[derive(Debug)]
pub struct CompareContext {
    pub options: ComparerOptions,
    attribute_patterns: Vec<Regex>,
}

impl CompareContext {
    pub fn new(options: ComparerOptions) -> Result<Self, CompareError> {
        let mut attribute_patterns = Vec::new();

        if options.compare_attributes == AttributeCompareMode::ByExpression {
            if options.attribute_names_to_compare.is_empty() {
                return Err(CompareError::InvalidArgument(
                    "attribute comparison by expression requires at least one name pattern"
                        .to_owned(),
                ));
            }

            for pattern in &options.attribute_names_to_compare {
                let regex = Regex::new(pattern).map_err(|e| {
                    CompareError::InvalidArgument(format!(
                        "invalid attribute name pattern '{pattern}': {e}"
                    ))
                })?;
                attribute_patterns.push(regex);
            }
        }

        Ok(Self {
            options,
            attribute_patterns,
        })
    }

    /// Whether this attribute participates in the diff under the options
    pub fn attribute_selected(&self, attribute: &AttributeDefinition) -> bool {
        match self.options.compare_attributes {
            AttributeCompareMode::Skip => false,
            AttributeCompareMode::All => true,
            AttributeCompareMode::ByExpression => self.attribute_patterns.iter().any(|p| {
                p.is_match(&attribute.name) || p.is_match(attribute.bare_name())
            }),
        }
    }

    /// Render a message through the configured formatter
    pub fn format(&self, item: &ItemRef, event: MessageEvent, detail: &str) -> String {
        self.options.format_message(item, event, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_expression_requires_patterns() {
        let options = ComparerOptions {
            compare_attributes: AttributeCompareMode::ByExpression,
            ..ComparerOptions::default()
        };

        let err = CompareContext::new(options).unwrap_err();
        assert!(matches!(err, CompareError::InvalidArgument(_)));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let options = ComparerOptions::compare_matching_attributes(["("]);
        let err = CompareContext::new(options).unwrap_err();
        assert!(matches!(err, CompareError::InvalidArgument(_)));
    }

    #[test]
    fn pattern_selection_ignores_attribute_suffix() {
        let options = ComparerOptions::compare_matching_attributes(["^Obsolete$"]);
        let ctx = CompareContext::new(options).unwrap();

        assert!(ctx.attribute_selected(&AttributeDefinition::new("Obsolete")));
        assert!(ctx.attribute_selected(&AttributeDefinition::new("ObsoleteAttribute")));
        assert!(!ctx.attribute_selected(&AttributeDefinition::new("Serializable")));
    }

    #[test]
    fn skip_mode_selects_nothing() {
        let ctx = CompareContext::new(ComparerOptions::default()).unwrap();
        assert!(!ctx.attribute_selected(&AttributeDefinition::new("Obsolete")));
    }

    #[test]
    fn all_mode_selects_everything() {
        let ctx = CompareContext::new(ComparerOptions::compare_all_attributes()).unwrap();
        assert!(ctx.attribute_selected(&AttributeDefinition::new("Anything")));
    }
}
