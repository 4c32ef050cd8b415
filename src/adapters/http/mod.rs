//! HTTP transport adapter - one route per intake entry point.

mod dto;
mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::routes;
