//! HTTP surface for the Hopper URL shortener.
//!
//! - `GET /` lists the mappings held in memory.
//! - `POST /shorten` creates a mapping from the `url` form field.
//! - `GET /{code}` redirects to the original URL.
//! - `GET /-/health` reports liveness.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod page;
pub mod state;

pub use app::App;
pub use state::AppState;
