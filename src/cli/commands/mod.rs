//! Command implementations for the `dk` binary.

pub mod bulk_status;
pub mod comment;
pub mod config;
pub mod create;
pub mod init;
pub mod label;
pub mod list;
pub mod show;
pub mod update;
pub mod user;
