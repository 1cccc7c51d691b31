//! HTTP inbound adapter exposing the REST API.

pub mod error;
pub mod health;
pub mod outcome;
pub mod resources;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
