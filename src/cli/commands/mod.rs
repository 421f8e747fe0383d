//! One module per subcommand.

pub mod audit_cmd;
pub mod delete;
pub mod get;
pub mod init;
pub mod list;
pub mod save;
