//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, service
//! and package management, filesystem access, locking and prompting.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::output` are forbidden.

pub mod apt;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod host;
pub mod prompt;
pub mod systemctl;
