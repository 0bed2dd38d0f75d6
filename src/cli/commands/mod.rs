pub mod auth;
pub mod candidate;
pub mod config;
pub mod jobpost;
pub mod user;
