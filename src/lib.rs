pub mod api;
pub mod config;
pub mod error;
pub mod internal;
pub mod utils;
