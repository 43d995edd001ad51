//! One module per subcommand.

pub mod add;
pub mod create;
pub mod delete;
pub mod list;
pub mod open;
pub mod remove;
