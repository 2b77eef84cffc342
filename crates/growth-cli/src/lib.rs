//! Library side of the kidchart command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
