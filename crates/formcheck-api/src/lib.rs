//! # FormCheck-API
//!
//! HTTP surface over the coaching orchestrator.
//!
//! ## Endpoints
//!
//! - `POST /compare-pose/` - Angle differences against the reference pose
//! - `POST /feedback/` - Angle differences plus coaching text
//! - `GET /current-pose/?pose_type=&category=` - Name of the reference pose
//! - `GET /health` - Health check
//!
//! Errors are returned as `{"error": message}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
