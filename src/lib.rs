//! `docket` - Issue-tracking backend library
//!
//! This crate provides the core functionality for the `dk` CLI tool,
//! an issue tracker built around an optimistic-concurrency update engine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (User, Issue, Comment, Label)
//! - [`storage`] - `SQLite` database layer and the mutation engines
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling
//! - [`validation`] - Field validators shared by CLI and storage

#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod validation;

pub use error::{DocketError, ErrorCode, Result, StructuredError};
