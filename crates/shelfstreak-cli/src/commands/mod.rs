pub mod backup;
pub mod bot;
pub mod config;
