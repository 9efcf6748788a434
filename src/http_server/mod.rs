//! # HTTP Server Module
//!
//! Serves the explain form and a JSON API over the same workflow.
//!
//! # Endpoints
//!
//! - `GET /` - form page
//! - `POST /explain` - explain the submitted text
//! - `POST /example` - load a random example into the form
//! - `POST /log/test` - append a synthetic row to the remote sink
//! - `POST /api/explain` - JSON explain
//! - `GET /health` - health check

pub mod config;
pub mod explain_routes;
pub mod health_routes;
pub mod page;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
