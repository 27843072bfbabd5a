//! Library side of the `formkit` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
pub mod settings;
