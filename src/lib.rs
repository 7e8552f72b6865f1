pub mod config;
pub mod data;
pub mod render;
pub mod report;
pub mod types;
