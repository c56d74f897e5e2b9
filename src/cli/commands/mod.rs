//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod destroy;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod path;
pub mod show;
