//! Beacon - static file server for small devices
//!
//! Serves a single-page application from a storage root, one connection at
//! a time.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
