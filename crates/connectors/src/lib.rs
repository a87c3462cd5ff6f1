pub mod cassandra;
pub mod diagnostics;
pub mod elasticsearch;
pub mod mongodb;
