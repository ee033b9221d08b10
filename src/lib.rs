//! College catalog - REST API for a college discovery site
//!
//! This library provides the catalog's configuration, storage, services
//! and HTTP layer. The binary in `main.rs` wires them together.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;
