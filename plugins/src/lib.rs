pub mod factory;
pub mod report;
pub mod tools;
