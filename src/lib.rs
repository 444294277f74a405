pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod explorer;
pub mod server;
