//! # Ranker Server
//!
//! HTTP surface for Ranker: category listings, the work lifecycle, upvotes
//! and username sessions, served with axum over the `ranker-core` services.

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
