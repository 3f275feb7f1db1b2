pub mod filter;
pub mod models;
pub mod output;
pub mod presenter;
pub mod session;
pub mod viewer;
pub mod walker;
