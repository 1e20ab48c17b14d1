//! List Commands

use entity_sync::FetchError;

use super::post_json;
use crate::config::AppConfig;
use crate::models::{ListSummary, NewList};

/// Create a list. Group pages pick the new list up from the
/// `group.<id>.lists` topic rather than from this response.
pub async fn create_list(config: &AppConfig, new_list: &NewList) -> Result<ListSummary, FetchError> {
    post_json(&config.url("/lists"), new_list, &new_list.name).await
}
