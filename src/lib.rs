pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;
pub mod services;
pub mod snapshot;
