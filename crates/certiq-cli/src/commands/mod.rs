pub mod fetch;
pub mod query;
