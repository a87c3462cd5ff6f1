pub mod config;
pub mod error;
pub mod filter;

pub use filter::{CompiledFilter, compile_filters};
