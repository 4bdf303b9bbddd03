//! # Session
//!
//! Runs a [`Storefront`](crate::controller::Storefront) inside its own Tokio task.
//!
//! The [`SessionActor`] owns the state and the receiving end of an `mpsc` channel; every
//! [`SessionClient`] holds a sender. Each request carries a `oneshot` reply channel, so a
//! caller awaits exactly its own result while the actor applies requests strictly in
//! order. Dropping the last client closes the channel and ends the task.

pub mod actor;
pub mod client;
pub mod message;

pub use actor::*;
pub use client::*;
pub use message::*;
