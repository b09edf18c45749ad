// src/common.rs

pub mod error;
pub mod format;
pub(crate) mod sync_utils;
