use tracing::{error, info};

use crate::clients::{ApiError, CatalogApi, HttpCatalogClient};
use crate::config::ClientConfig;
use crate::controller::Storefront;
use crate::session::{SessionActor, SessionClient};

/// Capacity of the session's request channel.
const SESSION_BUFFER: usize = 32;

/// The runtime orchestrator for a storefront session.
///
/// `StorefrontSystem` is responsible for:
/// - **Wiring**: building the catalog client from a [`ClientConfig`] and handing it to the
///   [`Storefront`] controllers
/// - **Lifecycle**: spawning the session actor and stopping it again
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(&ClientConfig::default())?;
///
/// system.session.load(1, 10).await?;
/// let snapshot = system.session.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    /// Client for sending user actions to the session actor
    pub session: SessionClient,

    page_size: u32,
    handle: tokio::task::JoinHandle<()>,
}

impl StorefrontSystem {
    /// Starts a session against the HTTP catalog service named in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = HttpCatalogClient::new(config)?;
        info!(base_url = api.base_url(), page_size = config.page_size, "Starting storefront");
        Ok(Self::with_api(api, config.page_size))
    }

    /// Starts a session against any catalog implementation, e.g. a mock in tests.
    pub fn with_api<C: CatalogApi + 'static>(api: C, page_size: u32) -> Self {
        let (actor, session) = SessionActor::new(SESSION_BUFFER, Storefront::new(api, page_size));
        let handle = tokio::spawn(actor.run());
        Self {
            session,
            page_size,
            handle,
        }
    }

    /// Loads the first page with the configured page size.
    pub async fn start(&self) -> Result<(), crate::session::SessionError> {
        self.session.load(1, self.page_size).await
    }

    /// Gracefully shuts down the session.
    ///
    /// Dropping the system's client closes the request channel once every other clone of
    /// it is gone; the actor then drains its queue and exits.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the session task finished cleanly
    /// - `Err(String)` if it panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        drop(self.session);

        if let Err(e) = self.handle.await {
            error!("Session task failed: {:?}", e);
            return Err(format!("Session task failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
