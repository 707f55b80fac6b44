//! HTTP driver adapter.
//!
//! - `GET  /health`
//! - `GET  /api/v1/presets`
//! - `GET  /api/v1/presets/{name}`
//! - `POST /api/v1/payoff`

mod controller;
pub mod request;
pub mod response;

pub use controller::{ApiError, AppState, create_router, evaluate};
