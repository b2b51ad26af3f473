pub mod config;
pub mod models;
pub mod relay;
pub mod search;
pub mod store;
