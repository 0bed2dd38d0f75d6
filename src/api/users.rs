use crate::api::{call, json_body};
use crate::error::{ClientError, ClientResult};
use crate::gateway::{Gateway, RequestOptions};
use crate::models::{NewUser, User, UserUpdate};

/// User administration. Registration and updates live under `v1/auth`,
/// listing under `v1/users`.
pub struct UsersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> UsersApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        call(self.gateway, "v1/users", RequestOptions::get(), "Failed to fetch users").await
    }

    pub async fn register(&self, user: &NewUser) -> ClientResult<User> {
        let options = RequestOptions::post(json_body(user)?);
        call(self.gateway, "v1/auth/register", options, "Failed to create user").await
    }

    pub async fn update(&self, user_id: i64, update: &UserUpdate) -> ClientResult<User> {
        if update.is_empty() {
            return Err(ClientError::invalid_input("no user fields to update"));
        }
        let options = RequestOptions::put(json_body(update)?);
        let path = format!("v1/auth/{}", user_id);
        call(self.gateway, &path, options, "Failed to update user").await
    }
}
