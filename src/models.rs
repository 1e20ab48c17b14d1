//! Frontend Models
//!
//! Data structures matching backend entities.

use entity_sync::Named;
use serde::{Deserialize, Serialize};

/// Group record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Who a list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    Group,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOwner {
    pub owner_type: OwnerType,
    pub owner_id: String,
}

impl ListOwner {
    pub fn group(id: impl Into<String>) -> Self {
        Self {
            owner_type: OwnerType::Group,
            owner_id: id.into(),
        }
    }
}

/// List as shown on a group page (no items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub owner: ListOwner,
    #[serde(default)]
    pub item_count: Option<u32>,
}

impl ListSummary {
    /// Identity of a rendered card: a rename or count change under the same
    /// id must replace the card, not reuse it
    pub fn render_key(&self) -> (String, String, Option<u32>) {
        (self.id.clone(), self.name.clone(), self.item_count)
    }
}

impl Named for ListSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Group member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Member {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub username: String,
}

/// Body of a list creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewList {
    pub name: String,
    #[serde(flatten)]
    pub owner: ListOwner,
}
