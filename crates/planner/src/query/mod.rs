pub mod dialect;
pub mod filter;
pub mod renderer;
