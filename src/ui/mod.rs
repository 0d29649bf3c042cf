//! Rendering only; every state change goes through [`crate::state::AppState`].

pub mod metrics;
pub mod panels;
pub mod plot;
pub mod tables;
