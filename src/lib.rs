//! # Storefront Client
//!
//! > **The client half of a small product catalog.**
//!
//! This crate talks to a remote catalog service over HTTP/JSON and keeps the state a
//! storefront screen needs: which view is active, which page of products is loaded, and
//! the add/edit form being filled in.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for client state
//! All mutable state lives in a single [`Storefront`](controller::Storefront). In a running
//! program it is owned by a [`SessionActor`](session::SessionActor) in its own Tokio task, so
//! a page response and a form submission can never interleave.
//!
//! ### The envelope decides
//! Every catalog response is wrapped in `{status, code, data, message}`. The envelope status,
//! not the HTTP status, is what makes a call succeed or fail.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Wire ([`clients`], [`model`])
//! - **Role**: The [`CatalogApi`](clients::CatalogApi) trait, its reqwest-backed
//!   [`HttpCatalogClient`](clients::HttpCatalogClient), and the serde types it decodes.
//! - **Testing**: [`MockCatalog`](clients::mock::MockCatalog) scripts responses without a server.
//!
//! ### 2. The State ([`controller`])
//! - **Role**: Pagination, view transitions and form validation, published through a
//!   [`Notifier`](controller::Notifier).
//!
//! ### 3. The Orchestrator ([`session`], [`lifecycle`])
//! - **Role**: Runs the state in an actor and handles startup, shutdown and logging.
//! - **Key items**: [`StorefrontSystem`](lifecycle::StorefrontSystem), [`SessionClient`](session::SessionClient).
//!
//! ### 4. Settings ([`config`])
//! - **Role**: Base URL and page size from a TOML file, `STOREFRONT_*` variables and flags.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # First page, info logs
//! RUST_LOG=info cargo run -- list
//!
//! # Another server
//! STOREFRONT_API_URL=http://catalog.internal:9090 cargo run -- list --page 2 --size 20
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod controller;
pub mod lifecycle;
pub mod model;
pub mod session;
