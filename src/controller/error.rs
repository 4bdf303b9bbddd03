//! Error types for the storefront controllers.

use thiserror::Error;

use crate::clients::ApiError;
use crate::controller::{ValidationErrors, ViewKind};
use crate::model::ProductId;

/// Errors from pagination requests.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaginationError {
    /// Page numbers are 1-based and sizes must be positive.
    #[error("Invalid page request: page {page}, size {size}")]
    InvalidRequest { page: u32, size: u32 },

    /// The fetch failed; the page-level error message has been set.
    #[error("Failed to load page: {0}")]
    Fetch(#[from] ApiError),
}

/// Errors from view transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    /// The action is not available from the current screen.
    #[error("Cannot {action} from the {from:?} view")]
    InvalidTransition { from: ViewKind, action: &'static str },

    #[error("Image index {index} out of range for {len} image(s)")]
    ImageOutOfRange { index: usize, len: usize },

    /// No product with this id is in the current list.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Fetching the product failed.
    #[error("Failed to open product: {0}")]
    Fetch(#[from] ApiError),
}

/// Errors from form operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    /// Local validation failed; no request was sent.
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    /// The catalog service rejected the submission. The draft is kept for a retry.
    #[error("{0}")]
    Submit(String),

    /// The seller list for the add form could not be fetched.
    #[error("{0}")]
    SellersUnavailable(String),

    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Image index {index} out of range for {len} image(s)")]
    ImageIndexOutOfRange { index: usize, len: usize },

    /// No form is open.
    #[error("No form is open")]
    NoForm,
}

/// Errors from [`Storefront`](crate::controller::Storefront) operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
