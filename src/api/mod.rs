//! Domain operation wrappers over the gateway.
//!
//! Each wrapper maps one (resource, verb) pair to a path, method and body,
//! and only supplies its default failure message; everything else goes
//! through [`expect_json`] and [`normalize::normalize_failure`].

pub mod auth;
pub mod candidates;
pub mod configs;
pub mod jobposts;
pub mod normalize;
pub mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};
use crate::gateway::{ApiResponse, Gateway, RequestOptions};
use crate::session::Session;

pub use auth::{AuthApi, SignIn};
pub use candidates::{CandidatesApi, Page};
pub use configs::ConfigsApi;
pub use jobposts::JobPostsApi;
pub use normalize::normalize_failure;
pub use users::UsersApi;

#[derive(Debug, Clone)]
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Session {
        self.gateway.session()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.gateway)
    }

    pub fn configs(&self) -> ConfigsApi<'_> {
        ConfigsApi::new(&self.gateway)
    }

    pub fn candidates(&self) -> CandidatesApi<'_> {
        CandidatesApi::new(&self.gateway)
    }

    pub fn job_posts(&self) -> JobPostsApi<'_> {
        JobPostsApi::new(&self.gateway)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.gateway)
    }
}

/// Parse a successful response, or normalize a failed one
pub fn expect_json<T: DeserializeOwned>(
    response: &ApiResponse,
    default_message: &str,
) -> ClientResult<T> {
    if !response.is_success() {
        return Err(normalize_failure(response, default_message));
    }
    if let Some(reason) = response.body_error() {
        return Err(ClientError::Body(reason.to_string()));
    }
    Ok(response.json()?)
}

pub(crate) async fn call<T: DeserializeOwned>(
    gateway: &Gateway,
    path: &str,
    options: RequestOptions,
    default_message: &str,
) -> ClientResult<T> {
    let response = gateway.request(path, options).await?;
    expect_json(&response, default_message)
}

pub(crate) fn json_body<B: Serialize + ?Sized>(body: &B) -> ClientResult<String> {
    Ok(serde_json::to_string(body)?)
}
