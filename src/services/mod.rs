pub mod aggregate;
pub mod engine;
pub mod filter;
pub mod queries;
pub mod ranking;
pub mod recommendations;

pub use engine::Engine;
