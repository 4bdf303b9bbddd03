//! The top-level controller pairing.
//!
//! [`Storefront`] owns the catalog client, the view state, the pagination state (whose
//! current page is the in-memory product list) and the open form, if any. It is the only
//! thing that mutates the product list, and only in response to a completed fetch or a
//! successful submission.

use tracing::{debug, info, instrument, warn};

use crate::clients::CatalogApi;
use crate::controller::{
    Field, FormError, FormSnapshot, Notifier, PaginationController, ProductForm, StateEvent,
    StorefrontError, ViewError, ViewKind, ViewState, ViewStateController,
};
use crate::model::{Page, Product, ProductId};

/// Plain copy of everything a screen needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontSnapshot {
    pub view: ViewState,
    pub selected_image: usize,
    pub page: Page<Product>,
    pub current_page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub form: Option<FormSnapshot>,
}

pub struct Storefront<C: CatalogApi> {
    api: C,
    notifier: Notifier,
    view: ViewStateController,
    pagination: PaginationController,
    form: Option<ProductForm>,
}

impl<C: CatalogApi> Storefront<C> {
    pub fn new(api: C, page_size: u32) -> Self {
        Self::with_notifier(api, page_size, Notifier::default())
    }

    pub fn with_notifier(api: C, page_size: u32, notifier: Notifier) -> Self {
        Self {
            api,
            view: ViewStateController::new(notifier.clone()),
            pagination: PaginationController::new(page_size, notifier.clone()),
            form: None,
            notifier,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn view(&self) -> &ViewStateController {
        &self.view
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    pub fn snapshot(&self) -> StorefrontSnapshot {
        StorefrontSnapshot {
            view: self.view.state().clone(),
            selected_image: self.view.selected_image(),
            page: self.pagination.page().clone(),
            current_page: self.pagination.current_page(),
            page_size: self.pagination.page_size(),
            loading: self.pagination.is_loading(),
            error: self.pagination.error().map(str::to_string),
            form: self.form.as_ref().map(ProductForm::snapshot),
        }
    }

    // --- Paging ---

    pub async fn load(&mut self, page: u32, size: u32) -> Result<(), StorefrontError> {
        Ok(self.pagination.load(&self.api, page, size).await?)
    }

    pub async fn reload(&mut self) -> Result<(), StorefrontError> {
        Ok(self.pagination.reload(&self.api).await?)
    }

    pub async fn next_page(&mut self) -> Result<(), StorefrontError> {
        Ok(self.pagination.next(&self.api).await?)
    }

    pub async fn previous_page(&mut self) -> Result<(), StorefrontError> {
        Ok(self.pagination.previous(&self.api).await?)
    }

    pub async fn change_page_size(&mut self, size: u32) -> Result<(), StorefrontError> {
        Ok(self.pagination.change_page_size(&self.api, size).await?)
    }

    // --- Navigation ---

    pub fn select(&mut self, product: Product) -> Result<(), StorefrontError> {
        Ok(self.view.select(product)?)
    }

    /// Shows the detail screen for a product from the current list.
    pub fn select_by_id(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        let product = self.listed(id)?;
        self.select(product)
    }

    /// Fetches a fresh copy of a product and shows its detail screen.
    #[instrument(skip(self))]
    pub async fn open_product(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        if self.view.kind() != ViewKind::List {
            return Err(ViewError::InvalidTransition {
                from: self.view.kind(),
                action: "open a product",
            }
            .into());
        }
        let product = self.api.get_product(id).await.map_err(ViewError::from)?;
        Ok(self.view.select(product)?)
    }

    pub fn select_image(&mut self, index: usize) -> Result<(), StorefrontError> {
        Ok(self.view.select_image(index)?)
    }

    /// Opens the add form and fetches its seller choices.
    ///
    /// A failed seller fetch leaves the form open with the failure recorded on it.
    pub async fn start_add(&mut self) -> Result<(), StorefrontError> {
        self.view.start_add()?;
        let mut form = ProductForm::add(self.notifier.clone());
        if let Err(e) = form.load_sellers(&self.api).await {
            debug!(error = %e, "Add form opened without sellers");
        }
        self.form = Some(form);
        Ok(())
    }

    pub fn start_edit(&mut self, product: Product) -> Result<(), StorefrontError> {
        self.view.start_edit(product.clone())?;
        self.form = Some(ProductForm::edit(product, self.notifier.clone()));
        Ok(())
    }

    pub fn start_edit_by_id(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        let product = self.listed(id)?;
        self.start_edit(product)
    }

    /// Fetches a product that may not be on the current page and opens the edit form for it.
    #[instrument(skip(self))]
    pub async fn fetch_and_edit(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        if self.view.kind() != ViewKind::List {
            return Err(ViewError::InvalidTransition {
                from: self.view.kind(),
                action: "start editing",
            }
            .into());
        }
        let product = self.api.get_product(id).await.map_err(ViewError::from)?;
        self.start_edit(product)
    }

    /// Returns to the list, discarding any open form.
    pub fn back(&mut self) -> Result<(), StorefrontError> {
        self.view.back()?;
        self.form = None;
        Ok(())
    }

    // --- Form ---

    fn form_mut(&mut self) -> Result<&mut ProductForm, FormError> {
        self.form.as_mut().ok_or(FormError::NoForm)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), StorefrontError> {
        self.form_mut()?.set_field(field, value);
        Ok(())
    }

    pub fn add_image(&mut self) -> Result<bool, StorefrontError> {
        Ok(self.form_mut()?.add_image())
    }

    pub fn remove_image(&mut self, index: usize) -> Result<String, StorefrontError> {
        Ok(self.form_mut()?.remove_image(index)?)
    }

    /// Submits the open form. On success the saved product is appended to (Add) or
    /// replaced in (Edit) the product list and the view returns to the list.
    #[instrument(skip(self))]
    pub async fn submit_form(&mut self) -> Result<Product, StorefrontError> {
        let form = self.form.as_mut().ok_or(FormError::NoForm)?;
        let product = form.submit(&self.api).await?;

        match self.view.submit_succeeded(&product)? {
            ViewKind::Add => self.pagination.append_product(product.clone()),
            _ => {
                if !self.pagination.replace_product(product.clone()) {
                    debug!(id = product.id, "Edited product is not on the current page");
                }
            }
        }
        self.form = None;
        self.notifier.notify(StateEvent::ProductsChanged);
        Ok(product)
    }

    // --- Deletion ---

    /// Deletes a product and drops it from the list. Only available from the list.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> Result<(), StorefrontError> {
        if self.view.kind() != ViewKind::List {
            return Err(ViewError::InvalidTransition {
                from: self.view.kind(),
                action: "delete a product",
            }
            .into());
        }
        if let Err(e) = self.api.delete_product(id).await {
            warn!(error = %e, "Delete failed");
            return Err(e.into());
        }
        if self.pagination.remove_product(id) {
            self.notifier.notify(StateEvent::ProductsChanged);
        }
        info!(id, "Product deleted");
        Ok(())
    }

    fn listed(&self, id: ProductId) -> Result<Product, ViewError> {
        self.pagination
            .find(id)
            .cloned()
            .ok_or(ViewError::NotFound(id))
    }
}
