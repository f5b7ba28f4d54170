pub mod errors;
pub mod models;
pub mod persistence;
pub mod session;
pub mod store;
pub mod views;
