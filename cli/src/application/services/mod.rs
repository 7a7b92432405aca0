//! Application services: use-case orchestration.
//!
//! Each service module implements one step of the installer by composing
//! domain logic with port trait calls. Services import only from
//! `crate::domain` and `crate::application::ports`, never from
//! `crate::infra` or `crate::output`.

pub mod orchestrator;
pub mod prerequisites;
pub mod privilege;
pub mod service_lifecycle;
pub mod staging;
