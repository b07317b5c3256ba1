pub mod betas;
pub mod config;
pub mod mapping;
pub mod metadata;
pub mod types;
