pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod server;
