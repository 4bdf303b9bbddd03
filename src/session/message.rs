//! Commands understood by the session actor.

use tokio::sync::oneshot;

use crate::controller::{Field, StorefrontError, StorefrontSnapshot};
use crate::model::{Product, ProductId};

/// Errors returned through a [`SessionClient`](crate::session::SessionClient).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("Session closed")]
    Closed,
    #[error("Session dropped response channel")]
    Dropped,
    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, SessionError>>;

/// A user action, routed to the [`Storefront`](crate::controller::Storefront) the session owns.
///
/// Requests are handled one at a time, in arrival order.
#[derive(Debug)]
pub enum SessionRequest {
    Load {
        page: u32,
        size: u32,
        respond_to: Response<()>,
    },
    Reload {
        respond_to: Response<()>,
    },
    NextPage {
        respond_to: Response<()>,
    },
    PreviousPage {
        respond_to: Response<()>,
    },
    ChangePageSize {
        size: u32,
        respond_to: Response<()>,
    },
    Select {
        id: ProductId,
        respond_to: Response<()>,
    },
    OpenProduct {
        id: ProductId,
        respond_to: Response<()>,
    },
    SelectImage {
        index: usize,
        respond_to: Response<()>,
    },
    StartAdd {
        respond_to: Response<()>,
    },
    StartEdit {
        id: ProductId,
        respond_to: Response<()>,
    },
    FetchAndEdit {
        id: ProductId,
        respond_to: Response<()>,
    },
    Back {
        respond_to: Response<()>,
    },
    SetField {
        field: Field,
        value: String,
        respond_to: Response<()>,
    },
    AddImage {
        respond_to: Response<bool>,
    },
    RemoveImage {
        index: usize,
        respond_to: Response<String>,
    },
    Submit {
        respond_to: Response<Product>,
    },
    Delete {
        id: ProductId,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<StorefrontSnapshot>,
    },
}

impl SessionRequest {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionRequest::Load { .. } => "load",
            SessionRequest::Reload { .. } => "reload",
            SessionRequest::NextPage { .. } => "next_page",
            SessionRequest::PreviousPage { .. } => "previous_page",
            SessionRequest::ChangePageSize { .. } => "change_page_size",
            SessionRequest::Select { .. } => "select",
            SessionRequest::OpenProduct { .. } => "open_product",
            SessionRequest::SelectImage { .. } => "select_image",
            SessionRequest::StartAdd { .. } => "start_add",
            SessionRequest::StartEdit { .. } => "start_edit",
            SessionRequest::FetchAndEdit { .. } => "fetch_and_edit",
            SessionRequest::Back { .. } => "back",
            SessionRequest::SetField { .. } => "set_field",
            SessionRequest::AddImage { .. } => "add_image",
            SessionRequest::RemoveImage { .. } => "remove_image",
            SessionRequest::Submit { .. } => "submit",
            SessionRequest::Delete { .. } => "delete",
            SessionRequest::Snapshot { .. } => "snapshot",
        }
    }
}
