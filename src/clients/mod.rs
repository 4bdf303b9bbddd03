//! The API Client: everything that talks to the remote catalog service.

pub mod catalog_client;
pub mod error;
pub mod http_client;
pub mod mock;

pub use catalog_client::*;
pub use error::*;
pub use http_client::*;
