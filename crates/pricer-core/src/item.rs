use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Descriptive fields of an item awaiting a price.
///
/// Mirrors the item shape of the listing queue file, so a queue entry can be
/// deserialized directly. Fields the engine does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default)]
    pub title: Option<String>,
    /// Working title assigned before a final title exists.
    #[serde(default)]
    pub temp_title: Option<String>,
    /// Named specifics such as `Brand`, `Model`, `MPN`, `Color`.
    #[serde(default)]
    pub item_specifics: BTreeMap<String, String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemDescriptor {
    /// Creates a descriptor with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Adds or replaces a named specific.
    #[must_use]
    pub fn with_specific(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.item_specifics.insert(name.into(), value.into());
        self
    }

    /// The title if non-blank, otherwise the temporary title if non-blank.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        non_blank(self.title.as_deref()).or_else(|| non_blank(self.temp_title.as_deref()))
    }

    /// The named specific, treating blank values as absent.
    #[must_use]
    pub fn specific(&self, name: &str) -> Option<&str> {
        non_blank(self.item_specifics.get(name).map(String::as_str))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
