//! Which screen is active.
//!
//! ```text
//!   List --select(p)-----> Detail(p)     Detail --back()------------> List
//!   List --start_add()---> Add           Add    --back() | saved----> List
//!   List --start_edit(p)-> Edit(p)       Edit   --back() | saved----> List
//! ```
//!
//! The controller starts in `List` and has no terminal state. Transitions happen only on
//! explicit user actions; anything not drawn above is rejected with
//! [`ViewError::InvalidTransition`].

use tracing::{debug, info};

use crate::controller::{Notifier, StateEvent, ViewError};
use crate::model::Product;

/// The active screen, with the product it shows where it needs one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    List,
    Detail(Product),
    Add,
    Edit(Product),
}

/// [`ViewState`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    Detail,
    Add,
    Edit,
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::List => ViewKind::List,
            ViewState::Detail(_) => ViewKind::Detail,
            ViewState::Add => ViewKind::Add,
            ViewState::Edit(_) => ViewKind::Edit,
        }
    }

    /// The product shown by `Detail` or being edited by `Edit`.
    pub fn product(&self) -> Option<&Product> {
        match self {
            ViewState::Detail(product) | ViewState::Edit(product) => Some(product),
            ViewState::List | ViewState::Add => None,
        }
    }
}

#[derive(Debug)]
pub struct ViewStateController {
    state: ViewState,
    selected_image: usize,
    notifier: Notifier,
}

impl ViewStateController {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            state: ViewState::List,
            selected_image: 0,
            notifier,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn kind(&self) -> ViewKind {
        self.state.kind()
    }

    /// Index of the image shown large on the detail screen.
    pub fn selected_image(&self) -> usize {
        self.selected_image
    }

    /// `List -> Detail(product)`.
    pub fn select(&mut self, product: Product) -> Result<(), ViewError> {
        self.require(ViewKind::List, "select a product")?;
        self.selected_image = 0;
        self.transition(ViewState::Detail(product));
        Ok(())
    }

    /// `List -> Add`.
    pub fn start_add(&mut self) -> Result<(), ViewError> {
        self.require(ViewKind::List, "start adding")?;
        self.transition(ViewState::Add);
        Ok(())
    }

    /// `List -> Edit(product)`.
    pub fn start_edit(&mut self, product: Product) -> Result<(), ViewError> {
        self.require(ViewKind::List, "start editing")?;
        self.transition(ViewState::Edit(product));
        Ok(())
    }

    /// `Detail | Add | Edit -> List`.
    pub fn back(&mut self) -> Result<(), ViewError> {
        if self.kind() == ViewKind::List {
            return Err(self.invalid("go back"));
        }
        self.transition(ViewState::List);
        Ok(())
    }

    /// `Add | Edit -> List` after the form was saved. Returns the form's view so the
    /// caller knows whether to append or replace in the product list.
    pub fn submit_succeeded(&mut self, product: &Product) -> Result<ViewKind, ViewError> {
        let from = self.kind();
        if !matches!(from, ViewKind::Add | ViewKind::Edit) {
            return Err(self.invalid("finish a submission"));
        }
        info!(id = product.id, ?from, "Submission saved");
        self.transition(ViewState::List);
        Ok(from)
    }

    /// Picks which image the detail screen shows large.
    pub fn select_image(&mut self, index: usize) -> Result<(), ViewError> {
        let len = match &self.state {
            ViewState::Detail(product) => product.images.len(),
            _ => return Err(self.invalid("select an image")),
        };
        if index >= len {
            return Err(ViewError::ImageOutOfRange { index, len });
        }
        self.selected_image = index;
        self.notifier.notify(StateEvent::DetailImageSelected(index));
        Ok(())
    }

    fn require(&self, expected: ViewKind, action: &'static str) -> Result<(), ViewError> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> ViewError {
        debug!(from = ?self.kind(), action, "Rejected view transition");
        ViewError::InvalidTransition {
            from: self.kind(),
            action,
        }
    }

    fn transition(&mut self, next: ViewState) {
        debug!(from = ?self.kind(), to = ?next.kind(), "View transition");
        self.state = next;
        self.notifier.notify(StateEvent::ViewChanged(self.kind()));
    }
}
