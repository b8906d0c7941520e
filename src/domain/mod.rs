pub mod key;
pub mod models;
