//! Comparison options and message formatting

use crate::severity::ItemRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How attribute usage differences participate in the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCompareMode {
    /// Never diff attributes
    #[default]
    Skip,

    /// Diff only attributes whose names match the configured patterns
    ByExpression,

    /// Diff every attribute
    All,
}

/// The kind of event a message describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEvent {
    Added,
    Removed,
    Changed,
}

/// Pluggable message renderer
///
/// Formatting never affects severity - a formatter can reword every message
/// without changing the classification.
pub trait MessageFormatter: Send + Sync {
    /// Render a message about `item` for the given event
    fn format(&self, item: &ItemRef, event: MessageEvent, detail: &str) -> String;
}

/// Default formatter: "{kind} {full_name} {detail}"
#[derive(Debug, Default)]
pub struct DefaultMessageFormatter;

impl MessageFormatter for DefaultMessageFormatter {
    fn format(&self, item: &ItemRef, _event: MessageEvent, detail: &str) -> String {
        format!("{} {} {}", capitalize(item.kind.as_str()), item.full_name, detail)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Options controlling a comparison run
#[derive(Clone)]
pub struct ComparerOptions {
    /// Attribute diffing mode
    pub compare_attributes: AttributeCompareMode,

    /// Name patterns (regex) selecting attributes for `ByExpression` mode
    pub attribute_names_to_compare: Vec<String>,

    /// Message renderer
    pub message_formatter: Arc<dyn MessageFormatter>,
}

impl Default for ComparerOptions {
    fn default() -> Self {
        Self {
            compare_attributes: AttributeCompareMode::Skip,
            attribute_names_to_compare: Vec::new(),
            message_formatter: Arc::new(DefaultMessageFormatter),
        }
    }
}

impl std::fmt::Debug for ComparerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparerOptions")
            .field("compare_attributes", &self.compare_attributes)
            .field("attribute_names_to_compare", &self.attribute_names_to_compare)
            .finish_non_exhaustive()
    }
}

impl ComparerOptions {
    /// Options that diff every attribute
    pub fn compare_all_attributes() -> Self {
        Self {
            compare_attributes: AttributeCompareMode::All,
            ..Self::default()
        }
    }

    /// Options that diff attributes matching the given name patterns
    pub fn compare_matching_attributes(
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            compare_attributes: AttributeCompareMode::ByExpression,
            attribute_names_to_compare: patterns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the message formatter
    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.message_formatter = formatter;
        self
    }

    /// Render a message through the configured formatter
    pub fn format_message(&self, item: &ItemRef, event: MessageEvent, detail: &str) -> String {
        self.message_formatter.format(item, event, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::ItemKind;

    #[test]
    fn default_formatter_wording() {
        let item = ItemRef::new(ItemKind::Method, "Run", "MyLib.Runner.Run");
        let message = DefaultMessageFormatter.format(&item, MessageEvent::Added, "has been added");
        assert_eq!(message, "Method MyLib.Runner.Run has been added");
    }

    #[test]
    fn custom_formatter_is_used() {
        struct Terse;
        impl MessageFormatter for Terse {
            fn format(&self, item: &ItemRef, _event: MessageEvent, detail: &str) -> String {
                format!("{}: {detail}", item.name)
            }
        }

        let options = ComparerOptions::default().with_formatter(Arc::new(Terse));
        let item = ItemRef::new(ItemKind::Field, "Count", "MyLib.Runner.Count");
        let message = options.format_message(&item, MessageEvent::Removed, "gone");
        assert_eq!(message, "Count: gone");
    }

    #[test]
    fn default_mode_skips_attributes() {
        assert_eq!(
            ComparerOptions::default().compare_attributes,
            AttributeCompareMode::Skip
        );
    }
}
