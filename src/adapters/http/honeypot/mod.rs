//! HTTP adapter for the honeypot endpoints.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness check
//! - `POST /honey-pot` - Answer one scammer message (requires `x-api-key`)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::HoneypotAppState;
pub use routes::{honeypot_router, public_router};
