// Core modules
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod service;
pub mod session;
