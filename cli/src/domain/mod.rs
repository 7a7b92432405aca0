//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs` or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod mode;
pub mod paths;
pub mod prerequisite;
pub mod service;

pub use config::InstallerConfig;
pub use error::InstallError;
pub use mode::{Invocation, InvocationMode};
pub use paths::{FileCopyTask, InstallationPaths, copy_plan};
pub use prerequisite::PrerequisiteRequirement;
pub use service::{ServiceAction, ServiceState};
