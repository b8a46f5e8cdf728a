//! ecsdeploy library
//!
//! Deploys a single container service to a cluster and follows it until it
//! converges, rendering live status to the terminal.

pub mod app;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod platform;
pub mod terminal;
pub mod utils;
pub mod workers;
