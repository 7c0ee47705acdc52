//! CLI subcommands.

pub mod categories;
pub mod extract;
