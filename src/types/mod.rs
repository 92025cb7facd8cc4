pub mod config;
pub mod row;
pub mod scoring;
