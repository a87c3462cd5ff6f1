pub mod database;
pub mod operator;
pub mod value;
