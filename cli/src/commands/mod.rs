pub mod classify;
pub mod cli;
pub mod run;
pub mod tools;
