//! Cloneable handle to a running [`SessionActor`](crate::session::SessionActor).

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::controller::{Field, Notifier, StateEvent, StorefrontSnapshot};
use crate::model::{Product, ProductId};
use crate::session::{Response, SessionError, SessionRequest};

#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
    notifier: Notifier,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>, notifier: Notifier) -> Self {
        Self { sender, notifier }
    }

    /// Subscribes to state changes made by the session.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.notifier.subscribe()
    }

    async fn call<T>(
        &self,
        request: impl FnOnce(Response<T>) -> SessionRequest,
    ) -> Result<T, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Dropped)?
    }

    pub async fn load(&self, page: u32, size: u32) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::Load { page, size, respond_to }).await
    }

    pub async fn reload(&self) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::Reload { respond_to }).await
    }

    pub async fn next_page(&self) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::NextPage { respond_to }).await
    }

    pub async fn previous_page(&self) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::PreviousPage { respond_to }).await
    }

    pub async fn change_page_size(&self, size: u32) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::ChangePageSize { size, respond_to }).await
    }

    /// Shows the detail screen for a product on the current page.
    pub async fn select(&self, id: ProductId) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::Select { id, respond_to }).await
    }

    /// Fetches a product by id and shows its detail screen.
    pub async fn open_product(&self, id: ProductId) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::OpenProduct { id, respond_to }).await
    }

    pub async fn select_image(&self, index: usize) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::SelectImage { index, respond_to }).await
    }

    pub async fn start_add(&self) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::StartAdd { respond_to }).await
    }

    pub async fn start_edit(&self, id: ProductId) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::StartEdit { id, respond_to }).await
    }

    /// Fetches a product by id and opens the edit form for it.
    pub async fn fetch_and_edit(&self, id: ProductId) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::FetchAndEdit { id, respond_to }).await
    }

    pub async fn back(&self) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::Back { respond_to }).await
    }

    pub async fn set_field(&self, field: Field, value: impl Into<String>) -> Result<(), SessionError> {
        let value = value.into();
        self.call(|respond_to| SessionRequest::SetField { field, value, respond_to }).await
    }

    pub async fn add_image(&self) -> Result<bool, SessionError> {
        self.call(|respond_to| SessionRequest::AddImage { respond_to }).await
    }

    pub async fn remove_image(&self, index: usize) -> Result<String, SessionError> {
        self.call(|respond_to| SessionRequest::RemoveImage { index, respond_to }).await
    }

    pub async fn submit(&self) -> Result<Product, SessionError> {
        self.call(|respond_to| SessionRequest::Submit { respond_to }).await
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), SessionError> {
        self.call(|respond_to| SessionRequest::Delete { id, respond_to }).await
    }

    pub async fn snapshot(&self) -> Result<StorefrontSnapshot, SessionError> {
        self.call(|respond_to| SessionRequest::Snapshot { respond_to }).await
    }
}
