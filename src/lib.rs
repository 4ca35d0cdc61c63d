//! Client-side router for the trainer application.

pub mod app;
pub mod config;
pub mod history;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::schema::RouterConfig;
pub use routing::{RouteTarget, Router};
