//! Command-line front end for the wage statistics workspace.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
