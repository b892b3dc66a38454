// Command-line surface: argument parsing and console output

pub mod args;
pub mod console;

pub use args::Cli;
pub use console::{Console, ConsoleEvent};
