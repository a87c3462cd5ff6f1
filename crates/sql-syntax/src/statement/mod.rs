pub mod danger;
pub mod extract;
pub mod parse;
pub mod read_only;
pub mod validate;
