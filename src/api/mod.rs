//! HTTP API module for the roster engine.
//!
//! This module provides the REST endpoints for computing scheduling windows
//! and validating staffing of a set of shifts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ValidateRequest, WindowRequest};
pub use response::{ApiError, WindowResponse};
pub use state::AppState;
