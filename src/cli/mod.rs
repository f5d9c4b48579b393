//! Command-line interface module.

mod args;
pub mod exec;
pub mod posts;
pub mod serve;

pub use args::{Cli, Commands};
