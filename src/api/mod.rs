//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /cache` - Create or update an item
//! - `DELETE /cache` - Remove all items
//! - `GET /cache/:key` - Fetch an item
//! - `DELETE /cache/:key` - Delete an item
//! - `GET /stats` - Occupancy statistics
//! - `POST /cleanup` - Remove old items
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
