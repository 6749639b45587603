pub mod common;
pub mod config;
pub mod market;
pub mod notify;
pub mod signal;
pub mod store;
