//! The session actor: a single task that owns the [`Storefront`] and applies requests to
//! it in order. Because only this task touches the state, no locks are needed and a page
//! response can never interleave with a form submission.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clients::CatalogApi;
use crate::controller::{Storefront, StorefrontError};
use crate::session::{Response, SessionClient, SessionError, SessionRequest};

pub struct SessionActor<C: CatalogApi> {
    receiver: mpsc::Receiver<SessionRequest>,
    storefront: Storefront<C>,
}

impl<C: CatalogApi + 'static> SessionActor<C> {
    pub fn new(buffer_size: usize, storefront: Storefront<C>) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = SessionClient::new(sender, storefront.notifier().clone());
        let actor = Self {
            receiver,
            storefront,
        };
        (actor, client)
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Session started");

        while let Some(msg) = self.receiver.recv().await {
            debug!(request = msg.name(), "Request");
            let storefront = &mut self.storefront;
            match msg {
                SessionRequest::Load { page, size, respond_to } => {
                    reply(respond_to, storefront.load(page, size).await)
                }
                SessionRequest::Reload { respond_to } => reply(respond_to, storefront.reload().await),
                SessionRequest::NextPage { respond_to } => {
                    reply(respond_to, storefront.next_page().await)
                }
                SessionRequest::PreviousPage { respond_to } => {
                    reply(respond_to, storefront.previous_page().await)
                }
                SessionRequest::ChangePageSize { size, respond_to } => {
                    reply(respond_to, storefront.change_page_size(size).await)
                }
                SessionRequest::Select { id, respond_to } => {
                    reply(respond_to, storefront.select_by_id(id))
                }
                SessionRequest::OpenProduct { id, respond_to } => {
                    reply(respond_to, storefront.open_product(id).await)
                }
                SessionRequest::SelectImage { index, respond_to } => {
                    reply(respond_to, storefront.select_image(index))
                }
                SessionRequest::StartAdd { respond_to } => {
                    reply(respond_to, storefront.start_add().await)
                }
                SessionRequest::StartEdit { id, respond_to } => {
                    reply(respond_to, storefront.start_edit_by_id(id))
                }
                SessionRequest::FetchAndEdit { id, respond_to } => {
                    reply(respond_to, storefront.fetch_and_edit(id).await)
                }
                SessionRequest::Back { respond_to } => reply(respond_to, storefront.back()),
                SessionRequest::SetField { field, value, respond_to } => {
                    reply(respond_to, storefront.set_field(field, value))
                }
                SessionRequest::AddImage { respond_to } => reply(respond_to, storefront.add_image()),
                SessionRequest::RemoveImage { index, respond_to } => {
                    reply(respond_to, storefront.remove_image(index))
                }
                SessionRequest::Submit { respond_to } => {
                    reply(respond_to, storefront.submit_form().await)
                }
                SessionRequest::Delete { id, respond_to } => {
                    reply(respond_to, storefront.delete_product(id).await)
                }
                SessionRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(storefront.snapshot()));
                }
            }
        }

        info!(products = self.storefront.pagination().products().len(), "Session shutdown");
    }
}

fn reply<T>(respond_to: Response<T>, result: Result<T, StorefrontError>) {
    if let Err(e) = &result {
        warn!(error = %e, "Request failed");
    }
    let _ = respond_to.send(result.map_err(SessionError::from));
}
