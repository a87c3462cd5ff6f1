pub mod condition;
pub mod policy;
pub mod validation;
