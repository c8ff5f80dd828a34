//! Command-line authoring for exam tests.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
