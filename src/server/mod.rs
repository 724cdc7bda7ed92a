mod artists_routes;
mod auth_routes;
pub mod config;
mod dashboard_routes;
pub mod error;
mod genres_routes;
mod http_layers;
mod releases_routes;
mod responses;
pub mod server;
pub mod session;
mod spotlights_routes;
pub mod state;
mod submissions_routes;

pub use config::ServerConfig;
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::{make_app, run_server};
