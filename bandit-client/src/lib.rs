mod auth;
mod bandit_url;
mod client;
pub mod domain;
mod error;

pub(crate) use bandit_url::*;

pub use auth::*;
pub use client::*;
pub use error::*;
