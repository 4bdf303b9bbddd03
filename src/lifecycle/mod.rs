//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for running a storefront session:
//!
//! - **Session lifecycle**: Building the catalog client, spawning the session actor, shutting it down
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`StorefrontSystem`] - Owns the running session and its task handle
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod storefront_system;
pub mod tracing;

pub use storefront_system::*;
pub use self::tracing::*;
