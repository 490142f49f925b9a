//! Command handlers, one module per subcommand family.

pub mod check;
pub mod completions;
pub mod config;
pub mod inspect;
pub mod protect;
pub mod recover;
