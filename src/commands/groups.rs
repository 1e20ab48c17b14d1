//! Group Commands
//!
//! Fetches for a group's record, lists and members, plus the invalidation
//! topics the backend publishes for each of them.

use async_trait::async_trait;
use entity_sync::{FetchError, TopicTemplate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{get_json, GroupSource};
use crate::models::{Group, ListSummary, Member};

/// Group record changed
pub const GROUP_CHANGED: TopicTemplate = TopicTemplate::new("group", "changed");
/// A list owned by the group was created, renamed or deleted
pub const GROUP_LISTS: TopicTemplate = TopicTemplate::new("group", "lists");
/// Group membership changed
pub const GROUP_USERS: TopicTemplate = TopicTemplate::new("group", "users");

/// Characters left as-is inside a URL path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// `GroupSource` over the HTTP API
#[derive(Debug, Clone)]
pub struct HttpGroupSource {
    api_base: String,
}

impl HttpGroupSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    fn group_url(&self, id: &str, tail: &str) -> String {
        format!("{}/groups/{}{}", self.api_base, encode_segment(id), tail)
    }
}

#[async_trait(?Send)]
impl GroupSource for HttpGroupSource {
    async fn get_group(&self, id: &str) -> Result<Group, FetchError> {
        get_json(&self.group_url(id, ""), id).await
    }

    async fn get_group_lists(&self, id: &str) -> Result<Vec<ListSummary>, FetchError> {
        get_json(&self.group_url(id, "/lists"), id).await
    }

    async fn get_group_members(&self, id: &str) -> Result<Vec<Member>, FetchError> {
        get_json(&self.group_url(id, "/users"), id).await
    }
}
