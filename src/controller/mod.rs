//! Client-side state: which screen is active, which page of products is loaded, and the
//! open add/edit form.
//!
//! Every controller publishes its changes through a shared [`Notifier`], so a renderer can
//! subscribe once and redraw from a [`StorefrontSnapshot`].

pub mod error;
pub mod form;
pub mod notify;
pub mod pagination;
pub mod storefront;
pub mod view_state;

pub use error::*;
pub use form::*;
pub use notify::*;
pub use pagination::*;
pub use storefront::*;
pub use view_state::*;
