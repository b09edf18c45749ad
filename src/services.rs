// src/services.rs

pub mod dashboard_service;
pub mod render_service;

pub use dashboard_service::{DashboardController, Lifecycle, TickOutcome};
pub use render_service::{RenderService, Widgets};
