pub mod config;
pub mod rename;
