pub mod config;
pub mod confirm;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;
