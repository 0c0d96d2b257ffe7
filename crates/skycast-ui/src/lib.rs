//! Terminal dashboard for SkyCast.
//!
//! [`AppServices`] owns the runtime and API client, [`DashboardModel`] owns
//! what the user sees, and [`render`] turns that into text.

pub mod app_services;
mod error_mapping;
pub mod models;
pub mod render;
pub mod services;

pub use app_services::AppServices;
pub use models::dashboard_model::DashboardModel;
