//! Backend Command Wrappers
//!
//! Frontend bindings to the Grocky HTTP API, organized by domain.

mod auth;
mod events;
mod groups;
mod lists;

use async_trait::async_trait;
use entity_sync::FetchError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Group, ListSummary, Member};

// Re-export all public items
pub use auth::*;
pub use events::*;
pub use groups::*;
pub use lists::*;

/// Remote data source for everything scoped to one group
#[async_trait(?Send)]
pub trait GroupSource {
    async fn get_group(&self, id: &str) -> Result<Group, FetchError>;
    async fn get_group_lists(&self, id: &str) -> Result<Vec<ListSummary>, FetchError>;
    async fn get_group_members(&self, id: &str) -> Result<Vec<Member>, FetchError>;
}

// ========================
// Request Helpers
// ========================

fn map_gloo_error(e: gloo_net::Error) -> FetchError {
    match e {
        gloo_net::Error::SerdeError(e) => FetchError::Decode(e.to_string()),
        other => FetchError::Transport(other.to_string()),
    }
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, FetchError> {
    if !response.ok() {
        return Err(FetchError::from_status(response.status(), what));
    }
    response.json::<T>().await.map_err(map_gloo_error)
}

pub(crate) async fn get_json<T: DeserializeOwned>(url: &str, what: &str) -> Result<T, FetchError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(map_gloo_error)?;
    decode(response, what).await
}

pub(crate) async fn post_json<B, T>(url: &str, body: &B, what: &str) -> Result<T, FetchError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(url)
        .header("Accept", "application/json")
        .json(body)
        .map_err(map_gloo_error)?
        .send()
        .await
        .map_err(map_gloo_error)?;
    decode(response, what).await
}
