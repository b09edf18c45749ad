// src/models.rs

pub mod actions;
pub mod metrics;
pub mod snapshot;
