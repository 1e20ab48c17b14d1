//! Invalidation Topics
//!
//! Topic names have the form `<entity>.<key>.<suffix>`, e.g. `group.g1.lists`.

use std::fmt;

/// Placeholder used in a topic name when the identity key is absent
pub const NULL_KEY_SENTINEL: &str = "null";

/// Fixed parts of a topic; the key is filled in per binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicTemplate {
    pub entity: &'static str,
    pub suffix: &'static str,
}

impl TopicTemplate {
    pub const fn new(entity: &'static str, suffix: &'static str) -> Self {
        Self { entity, suffix }
    }

    /// Build the concrete topic for a key
    pub fn topic(&self, key: Option<&str>) -> Topic {
        let key = match key {
            Some(k) if !k.is_empty() => k,
            _ => NULL_KEY_SENTINEL,
        };
        Topic(format!("{}.{}.{}", self.entity, key, self.suffix))
    }
}

/// A concrete topic name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(String);

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Topic(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Topic(s.to_string())
    }
}
