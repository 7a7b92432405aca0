//! Log simulator installer library: exposes modules for integration testing.

pub mod app;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod output;
