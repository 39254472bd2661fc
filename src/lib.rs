//! Audio download widget and admin provisioning tool for a local media service.

pub mod api;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ui;
