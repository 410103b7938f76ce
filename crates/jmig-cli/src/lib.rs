//! Library components of the `jmig` command-line tool.

pub mod config;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod scan;
