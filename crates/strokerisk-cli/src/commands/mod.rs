pub mod config;
pub mod hospitals;
pub mod repl;
pub mod validate;
