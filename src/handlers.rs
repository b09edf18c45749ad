// src/handlers.rs

pub mod commands;
pub mod controls;
