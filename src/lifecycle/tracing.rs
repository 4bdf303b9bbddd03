//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The output uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! Levels come from the `RUST_LOG` environment variable; nothing is printed when it is unset.
//!
//! ## What Gets Traced
//!
//! - **HTTP calls**: one span per catalog request, with method, path and status
//! - **Paging**: requested page and size, stale responses that were discarded
//! - **Navigation**: every view transition, and every rejected one at `debug`
//! - **Forms**: validation failures, submissions, and the saved product id
//!
//! ## Usage Examples
//!
//! ```bash
//! # Requests and results
//! RUST_LOG=info storefront list
//!
//! # Full payloads and view transitions
//! RUST_LOG=debug storefront list --page 2
//!
//! # Only the HTTP client
//! RUST_LOG=storefront::clients=debug storefront show 7
//! ```
//!
//! With `RUST_LOG=info` a page load looks like:
//!
//! ```text
//! INFO list_products{page=1 size=10}: Listed products page=1 total_pages=2 count=10
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
