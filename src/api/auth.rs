use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

use crate::api::{call, expect_json};
use crate::error::{ClientError, ClientResult};
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{AccessToken, User};

/// Result of the two-step sign-in: the token is stored even when the
/// follow-up user lookup fails, which is reported in `user`.
#[derive(Debug)]
pub struct SignIn {
    pub token: String,
    pub user: ClientResult<User>,
}

pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a token and store it in the session.
    ///
    /// The credentials go out form-url-encoded, the one body that is not JSON.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", username)
            .append_pair("password", password)
            .finish();

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let options = RequestOptions::new(Method::POST)
            .with_headers(headers)
            .with_body(body);
        let response = self.gateway.request("v1/auth/login", options).await?;
        let granted: AccessToken = expect_json(&response, "Failed to login")?;

        match granted.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.gateway.session().set_token(&token);
                tracing::info!(username, "login succeeded");
                Ok(token)
            }
            None => Err(ClientError::api(response.status(), "Invalid credentials")),
        }
    }

    /// `v1/auth/me` with an explicit bearer token
    pub async fn current_user_with_token(&self, token: &str) -> ClientResult<User> {
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::invalid_input("token contains characters not allowed in a header"))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let options = RequestOptions::get().with_headers(headers);
        call(self.gateway, "v1/auth/me", options, "Failed to fetch user details").await
    }

    /// Fetch the signed-in user and remember their role as a UI hint
    pub async fn load_current_user(&self) -> ClientResult<User> {
        let token = self
            .gateway
            .session()
            .get_token()
            .ok_or_else(|| ClientError::invalid_input("not logged in"))?;

        let user = self.current_user_with_token(&token).await?;
        self.gateway.session().set_user_role(user.role.as_str());
        Ok(user)
    }

    /// Login, then load the user. Only the login step can fail the whole call.
    pub async fn sign_in(&self, username: &str, password: &str) -> ClientResult<SignIn> {
        let token = self.login(username, password).await?;
        let user = self.current_user_with_token(&token).await;

        match &user {
            Ok(user) => self.gateway.session().set_user_role(user.role.as_str()),
            Err(e) => tracing::warn!(error = %e, "signed in but could not load user details"),
        }

        Ok(SignIn { token, user })
    }

    /// Forget the token and the role. Purely local; the backend keeps no session.
    pub fn logout(&self) {
        self.gateway.session().logout();
        tracing::info!("logged out");
    }
}
