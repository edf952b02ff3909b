pub mod commands;
pub mod models;
pub mod reports;
pub mod session;
pub mod storage;
pub mod tickets;
