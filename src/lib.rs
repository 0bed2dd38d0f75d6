pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use gateway::{ApiResponse, Gateway, RequestOptions};
pub use session::Session;
