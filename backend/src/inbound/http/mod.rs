//! HTTP inbound adapter exposing the user endpoints and health probes.

pub mod error;
pub mod health;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;
