pub mod actors;
pub mod logger;
pub mod models;
