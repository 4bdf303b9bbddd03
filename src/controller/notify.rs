//! "State changed" notifications.
//!
//! Controllers never re-render anything themselves. Each state-changing operation
//! publishes a [`StateEvent`] on a broadcast channel and whoever draws the screen
//! subscribes and redraws from the controller state.

use tokio::sync::broadcast;
use tracing::trace;

use crate::controller::ViewKind;
use crate::model::ProductId;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    ViewChanged(ViewKind),
    PageLoading { page: u32, size: u32 },
    PageLoaded { page: u32, total_pages: u32 },
    PageFailed { message: String },
    /// A stale page response arrived and was dropped.
    PageDiscarded { seq: u64 },
    /// The in-memory product list changed outside a page fetch.
    ProductsChanged,
    DetailImageSelected(usize),
    FormChanged,
    SellersLoaded { count: usize },
    FormSubmitting,
    FormSaved { id: ProductId },
    FormFailed { message: String },
}

/// Fan-out sender for [`StateEvent`]s. Clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<StateEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.sender.subscribe()
    }

    pub fn notify(&self, event: StateEvent) {
        trace!(?event, "notify");
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }
}
