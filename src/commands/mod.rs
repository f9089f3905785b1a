//! CLI subcommands

pub mod check;
pub mod init;
pub mod list;
pub mod new;
pub mod publish;
pub mod show;
