use std::collections::HashMap;

/// Property map of one `VEVENT` block, keyed by property name without parameters.
///
/// Only lives for the duration of a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    properties: HashMap<String, String>,
}

impl RawEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a property; a later occurrence of the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Value of `key` when present and non-empty
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn dtstart(&self) -> Option<&str> {
        self.non_empty("DTSTART")
    }

    pub fn summary(&self) -> Option<&str> {
        self.non_empty("SUMMARY")
    }

    pub fn location(&self) -> Option<&str> {
        self.non_empty("LOCATION")
    }

    pub fn description(&self) -> Option<&str> {
        self.non_empty("DESCRIPTION")
    }

    pub fn uid(&self) -> Option<&str> {
        self.non_empty("UID")
    }

    /// An event is usable only with both a start and a title.
    pub fn is_complete(&self) -> bool {
        self.dtstart().is_some() && self.summary().is_some()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
