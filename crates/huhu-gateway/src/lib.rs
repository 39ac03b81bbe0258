//! HTTP surface of the Huhu jokes API.
//!
//! [`App::router`] wires the public read routes, the admin write routes
//! behind [`middleware::require_admin_key`], and the shared tower-http stack.

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
