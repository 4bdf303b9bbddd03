//! Add/Edit product form.
//!
//! One [`ProductForm`] backs both screens; [`FormMode`] decides which request a submit
//! sends and whether a seller must be picked. The form keeps the draft, per-field
//! validation errors and the submission status. A failed submission never discards the
//! draft.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, instrument, warn};

use crate::clients::CatalogApi;
use crate::controller::{FormError, Notifier, StateEvent};
use crate::model::{Product, ProductId, ProductPayload, Seller, SellerId, SellerRef};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_NOT_POSITIVE: &str = "Price must be a positive number";
pub const SELLER_REQUIRED: &str = "Seller is required";
pub const SELLER_INVALID: &str = "Please select a valid seller";
pub const ADD_FAILED: &str = "Failed to add product. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update product. Please try again.";
pub const SELLERS_LOAD_FAILED: &str = "Failed to load sellers. Please try again later.";

/// A named input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Description,
    Price,
    /// The pending image URL, appended to the image list by [`ProductForm::add_image`].
    ImageUrl,
    /// Seller selection, add form only.
    Seller,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::ImageUrl => "imageUrl",
            Field::Seller => "sellerId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            "price" => Ok(Field::Price),
            "imageUrl" | "image_url" | "image" => Ok(Field::ImageUrl),
            "sellerId" | "seller_id" | "seller" => Ok(Field::Seller),
            other => Err(format!("Unknown form field: {other}")),
        }
    }
}

/// Field name to error message. Empty means valid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn remove(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }
}

/// Which screen the form backs.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Add,
    Edit(Product),
}

/// Unsaved field values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub images: Vec<String>,
    pub seller_id: String,
}

impl Draft {
    fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: String::new(),
            images: product.images.clone(),
            seller_id: String::new(),
        }
    }
}

/// Parses a price typed by the user. Must be a finite number greater than zero.
pub fn parse_price(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PRICE_REQUIRED);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(PRICE_NOT_POSITIVE),
    }
}

/// Plain copy of a form's state, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub mode: FormMode,
    pub draft: Draft,
    pub errors: ValidationErrors,
    pub sellers: Vec<Seller>,
    pub sellers_error: Option<String>,
    pub submitting: bool,
    pub submit_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    mode: FormMode,
    draft: Draft,
    errors: ValidationErrors,
    sellers: Vec<Seller>,
    sellers_error: Option<String>,
    submitting: bool,
    submit_error: Option<String>,
    notifier: Notifier,
}

impl ProductForm {
    /// An empty form for creating a product.
    pub fn add(notifier: Notifier) -> Self {
        Self::with_mode(FormMode::Add, Draft::default(), notifier)
    }

    /// A form pre-filled from `product`.
    pub fn edit(product: Product, notifier: Notifier) -> Self {
        let draft = Draft::from_product(&product);
        Self::with_mode(FormMode::Edit(product), draft, notifier)
    }

    fn with_mode(mode: FormMode, draft: Draft, notifier: Notifier) -> Self {
        Self {
            mode,
            draft,
            errors: ValidationErrors::default(),
            sellers: Vec::new(),
            sellers_error: None,
            submitting: false,
            submit_error: None,
            notifier,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self.mode, FormMode::Add)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn sellers_error(&self) -> Option<&str> {
        self.sellers_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            mode: self.mode.clone(),
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            sellers: self.sellers.clone(),
            sellers_error: self.sellers_error.clone(),
            submitting: self.submitting,
            submit_error: self.submit_error.clone(),
        }
    }

    /// Updates one draft value and clears that field's validation error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.draft.title = value,
            Field::Description => self.draft.description = value,
            Field::Price => self.draft.price = value,
            Field::ImageUrl => self.draft.image_url = value,
            Field::Seller => self.draft.seller_id = value,
        }
        if self.errors.remove(field) {
            debug!(%field, "Cleared validation error");
        }
        self.notifier.notify(StateEvent::FormChanged);
    }

    /// Appends the trimmed pending image URL and clears it. Blank input changes nothing.
    /// Duplicates and malformed URLs are accepted.
    pub fn add_image(&mut self) -> bool {
        let url = self.draft.image_url.trim();
        if url.is_empty() {
            return false;
        }
        let url = url.to_string();
        self.draft.images.push(url);
        self.draft.image_url.clear();
        self.notifier.notify(StateEvent::FormChanged);
        true
    }

    /// Removes the image at `index`; later images shift down by one.
    pub fn remove_image(&mut self, index: usize) -> Result<String, FormError> {
        let len = self.draft.images.len();
        if index >= len {
            return Err(FormError::ImageIndexOutOfRange { index, len });
        }
        let removed = self.draft.images.remove(index);
        self.notifier.notify(StateEvent::FormChanged);
        Ok(removed)
    }

    /// Makes `sellers` the choices for the seller selection.
    pub fn set_sellers(&mut self, sellers: Vec<Seller>) {
        self.notifier.notify(StateEvent::SellersLoaded {
            count: sellers.len(),
        });
        self.sellers = sellers;
        self.sellers_error = None;
    }

    /// Fetches the seller list for the add form.
    pub async fn load_sellers<C>(&mut self, api: &C) -> Result<(), FormError>
    where
        C: CatalogApi + ?Sized,
    {
        match api.list_sellers().await {
            Ok(sellers) => {
                self.set_sellers(sellers);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load sellers");
                let message = e.message_or(SELLERS_LOAD_FAILED);
                self.sellers_error = Some(message.clone());
                self.notifier.notify(StateEvent::FormChanged);
                Err(FormError::SellersUnavailable(message))
            }
        }
    }

    /// Checks the draft without touching form state.
    pub fn check(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if self.draft.title.trim().is_empty() {
            errors.insert(Field::Title, TITLE_REQUIRED);
        }
        if let Err(message) = parse_price(&self.draft.price) {
            errors.insert(Field::Price, message);
        }
        if self.is_add() {
            if let Err(message) = self.selected_seller() {
                errors.insert(Field::Seller, message);
            }
        }
        errors
    }

    /// Runs [`check`](Self::check), stores the result as the form's errors and returns
    /// whether the draft is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self.check();
        self.errors.is_empty()
    }

    fn selected_seller(&self) -> Result<SellerId, &'static str> {
        let raw = self.draft.seller_id.trim();
        if raw.is_empty() {
            return Err(SELLER_REQUIRED);
        }
        let id: SellerId = raw.parse().map_err(|_| SELLER_INVALID)?;
        if !self.sellers.is_empty() && !self.sellers.iter().any(|s| s.id == id) {
            return Err(SELLER_INVALID);
        }
        Ok(id)
    }

    /// Builds the request body from a valid draft.
    pub fn payload(&self) -> Result<ProductPayload, ValidationErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        let price = parse_price(&self.draft.price).map_err(|_| errors.clone())?;
        let (id, seller) = match &self.mode {
            FormMode::Add => {
                let seller = self.selected_seller().map_err(|_| errors.clone())?;
                (None, Some(SellerRef { id: seller }))
            }
            FormMode::Edit(product) => (Some(product.id), None),
        };
        Ok(ProductPayload {
            id,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            price,
            images: self.draft.images.clone(),
            seller,
        })
    }

    /// Validates and sends the draft: create for Add, update-by-id for Edit.
    ///
    /// Invalid drafts fail with [`FormError::Invalid`] before any request is made. A
    /// rejected request sets a generic submission error and keeps the draft for a retry.
    /// On success the saved product is returned for the caller to hand to the list and
    /// view controllers.
    #[instrument(skip_all)]
    pub async fn submit<C>(&mut self, api: &C) -> Result<Product, FormError>
    where
        C: CatalogApi + ?Sized,
    {
        debug!(add = self.is_add(), "submit called");
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        if !self.validate() {
            debug!(errors = self.errors.len(), "Validation failed");
            self.notifier.notify(StateEvent::FormChanged);
            return Err(FormError::Invalid(self.errors.clone()));
        }
        let payload = self.payload().map_err(FormError::Invalid)?;

        self.submitting = true;
        self.submit_error = None;
        self.notifier.notify(StateEvent::FormSubmitting);

        let (result, fallback) = match &self.mode {
            FormMode::Add => (api.create_product(payload).await, ADD_FAILED),
            FormMode::Edit(product) => {
                let id: ProductId = product.id;
                (api.update_product(id, payload).await, UPDATE_FAILED)
            }
        };
        self.submitting = false;

        match result {
            Ok(product) => {
                info!(id = product.id, "Product saved");
                self.notifier.notify(StateEvent::FormSaved { id: product.id });
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                self.submit_error = Some(fallback.to_string());
                self.notifier.notify(StateEvent::FormFailed {
                    message: fallback.to_string(),
                });
                Err(FormError::Submit(fallback.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{Call, MockCatalog};
    use crate::clients::ApiError;

    fn add_form() -> ProductForm {
        ProductForm::add(Notifier::default())
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 19.99 "), Ok(19.99));
        assert_eq!(parse_price(""), Err(PRICE_REQUIRED));
        assert_eq!(parse_price("   "), Err(PRICE_REQUIRED));
        assert_eq!(parse_price("-5"), Err(PRICE_NOT_POSITIVE));
        assert_eq!(parse_price("0"), Err(PRICE_NOT_POSITIVE));
        assert_eq!(parse_price("abc"), Err(PRICE_NOT_POSITIVE));
        assert_eq!(parse_price("NaN"), Err(PRICE_NOT_POSITIVE));
        assert_eq!(parse_price("inf"), Err(PRICE_NOT_POSITIVE));
    }

    #[test]
    fn test_field_names_round_trip() {
        let fields = [
            Field::Title,
            Field::Description,
            Field::Price,
            Field::ImageUrl,
            Field::Seller,
        ];
        for field in fields {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn test_validate_reports_each_required_field() {
        let mut form = add_form();
        assert!(!form.validate());
        assert_eq!(form.errors().get(Field::Title), Some(TITLE_REQUIRED));
        assert_eq!(form.errors().get(Field::Price), Some(PRICE_REQUIRED));
        assert_eq!(form.errors().get(Field::Seller), Some(SELLER_REQUIRED));
        assert!(!form.errors().contains(Field::Description));
    }

    #[test]
    fn test_set_field_clears_only_that_error() {
        let mut form = add_form();
        form.validate();
        form.set_field(Field::Title, "Lamp");
        assert!(!form.errors().contains(Field::Title));
        assert!(form.errors().contains(Field::Price));
        assert_eq!(form.draft().title, "Lamp");
    }

    #[test]
    fn test_edit_form_needs_no_seller() {
        let product = Product::new(5, "Desk", 120.0).with_description("Oak");
        let mut form = ProductForm::edit(product, Notifier::default());
        assert_eq!(form.draft().price, "120");
        assert_eq!(form.draft().description, "Oak");
        assert!(form.validate());

        let payload = form.payload().unwrap();
        assert_eq!(payload.id, Some(5));
        assert_eq!(payload.seller, None);
        assert_eq!(payload.price, 120.0);
    }

    #[test]
    fn test_seller_must_be_one_of_the_loaded_sellers() {
        let mut form = add_form();
        form.set_sellers(vec![Seller::new(3, "Acme")]);
        form.set_field(Field::Title, "Lamp");
        form.set_field(Field::Price, "19.99");

        form.set_field(Field::Seller, "x");
        assert_eq!(form.check().get(Field::Seller), Some(SELLER_INVALID));
        form.set_field(Field::Seller, "4");
        assert_eq!(form.check().get(Field::Seller), Some(SELLER_INVALID));
        form.set_field(Field::Seller, "3");
        assert!(form.check().is_empty());
    }

    #[test]
    fn test_add_image_ignores_blank_input() {
        let mut form = add_form();
        form.set_field(Field::ImageUrl, "   ");
        assert!(!form.add_image());
        assert!(form.draft().images.is_empty());

        form.set_field(Field::ImageUrl, "  http://img/1.png ");
        assert!(form.add_image());
        form.set_field(Field::ImageUrl, "http://img/1.png");
        assert!(form.add_image());
        assert_eq!(form.draft().images, vec!["http://img/1.png", "http://img/1.png"]);
        assert_eq!(form.draft().image_url, "");
    }

    #[test]
    fn test_remove_image_shifts_later_entries() {
        let mut form = add_form();
        for url in ["a", "b", "c"] {
            form.set_field(Field::ImageUrl, url);
            form.add_image();
        }
        assert_eq!(form.remove_image(1).unwrap(), "b");
        assert_eq!(form.draft().images, vec!["a", "c"]);
        assert_eq!(
            form.remove_image(2),
            Err(FormError::ImageIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_request() {
        let mock = MockCatalog::new();
        let mut form = add_form();
        form.set_field(Field::Price, "abc");
        form.set_field(Field::Seller, "3");

        let errors = match form.submit(&mock).await {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(Field::Price), Some(PRICE_NOT_POSITIVE));
        assert!(mock.calls().is_empty());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_add_submit_sends_seller_reference() {
        let mock = MockCatalog::new();
        let saved = Product::new(11, "Lamp", 19.99).with_seller(Seller::new(3, "Acme"));
        mock.expect_create().return_ok(saved.clone());

        let mut form = add_form();
        form.set_field(Field::Title, "Lamp");
        form.set_field(Field::Price, "19.99");
        form.set_field(Field::Seller, "3");

        let product = form.submit(&mock).await.unwrap();
        assert_eq!(product, saved);
        assert_eq!(
            mock.calls(),
            vec![Call::CreateProduct {
                payload: ProductPayload {
                    id: None,
                    title: "Lamp".into(),
                    description: String::new(),
                    price: 19.99,
                    images: vec![],
                    seller: Some(SellerRef { id: 3 }),
                }
            }]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let mock = MockCatalog::new();
        let product = Product::new(5, "Desk", 120.0);
        mock.expect_update(5)
            .return_err(ApiError::Application { message: Some("Validation failed".into()) });
        mock.expect_update(5).return_ok(Product::new(5, "Standing desk", 150.0));

        let mut form = ProductForm::edit(product, Notifier::default());
        form.set_field(Field::Title, "Standing desk");
        form.set_field(Field::Price, "150");

        let err = form.submit(&mock).await.unwrap_err();
        assert_eq!(err, FormError::Submit(UPDATE_FAILED.to_string()));
        assert_eq!(form.submit_error(), Some(UPDATE_FAILED));
        assert_eq!(form.draft().title, "Standing desk");
        assert!(!form.is_submitting());

        let saved = form.submit(&mock).await.unwrap();
        assert_eq!(saved.price, 150.0);
        assert_eq!(form.submit_error(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_load_sellers_failure_is_surfaced() {
        let mock = MockCatalog::new();
        mock.expect_list_sellers().return_err(ApiError::Http { status: 503 });
        mock.expect_list_sellers()
            .return_ok(vec![Seller::new(1, "Acme"), Seller::new(2, "Globex")]);

        let mut form = add_form();
        assert!(form.load_sellers(&mock).await.is_err());
        assert_eq!(form.sellers_error(), Some(SELLERS_LOAD_FAILED));

        form.load_sellers(&mock).await.unwrap();
        assert_eq!(form.sellers().len(), 2);
        assert_eq!(form.sellers_error(), None);
    }
}
