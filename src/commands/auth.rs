//! Auth Commands
//!
//! Session lookup. Signing in and out happens elsewhere.

use entity_sync::FetchError;

use super::get_json;
use crate::config::AppConfig;
use crate::models::Session;

/// Current session, or `None` when signed out
pub async fn get_session(config: &AppConfig) -> Result<Option<Session>, FetchError> {
    match get_json::<Option<Session>>(&config.url("/auth/session"), "session").await {
        Err(FetchError::Unauthorized) => Ok(None),
        other => other,
    }
}
