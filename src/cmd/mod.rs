pub mod config;
pub mod describe;
