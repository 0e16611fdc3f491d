//! CLI command implementations.

pub mod classify;
pub mod common;
pub mod config;
pub mod demo;
pub mod devices;
pub mod profiles;
pub mod render;
pub mod typing;
