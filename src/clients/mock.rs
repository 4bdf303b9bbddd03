//! # Mock Catalog
//!
//! Utilities for testing controllers without a running catalog service.
//!
//! [`MockCatalog`] implements [`CatalogApi`] by replaying scripted responses in order.
//! Script it with the `expect_*` builders, hand it to the code under test, then call
//! [`MockCatalog::verify`] to assert every expectation was consumed.
//!
//! ```ignore
//! let mock = MockCatalog::new();
//! mock.expect_list_products(1, 10).return_ok(page);
//! mock.expect_create().return_err(ApiError::Http { status: 500 });
//!
//! let mut storefront = Storefront::new(mock.clone(), 10);
//! // ...
//! mock.verify();
//! assert_eq!(mock.calls().len(), 2);
//! ```
//!
//! A request that arrives with no matching expectation panics, which fails the test.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::clients::{ApiError, CatalogApi};
use crate::model::{Page, Product, ProductId, ProductPayload, Seller};

/// A request the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProducts { page: u32, size: u32 },
    GetProduct { id: ProductId },
    CreateProduct { payload: ProductPayload },
    UpdateProduct { id: ProductId, payload: ProductPayload },
    DeleteProduct { id: ProductId },
    ListSellers,
}

/// Represents an expected request and the response to give it.
enum Expectation {
    ListProducts {
        page: u32,
        size: u32,
        response: Result<Page<Product>, ApiError>,
    },
    GetProduct {
        id: ProductId,
        response: Result<Product, ApiError>,
    },
    CreateProduct {
        response: Result<Product, ApiError>,
    },
    UpdateProduct {
        id: ProductId,
        response: Result<Product, ApiError>,
    },
    DeleteProduct {
        id: ProductId,
        response: Result<(), ApiError>,
    },
    ListSellers {
        response: Result<Vec<Seller>, ApiError>,
    },
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<Call>,
}

/// A scripted [`CatalogApi`]. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockCatalog {
    state: Arc<Mutex<MockState>>,
}

impl MockCatalog {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_products(page, size)` request.
    pub fn expect_list_products(&self, page: u32, size: u32) -> ExpectationBuilder<Page<Product>> {
        self.builder(move |response| Expectation::ListProducts { page, size, response })
    }

    /// Expects a `get_product(id)` request.
    pub fn expect_get_product(&self, id: ProductId) -> ExpectationBuilder<Product> {
        self.builder(move |response| Expectation::GetProduct { id, response })
    }

    /// Expects a `create_product` request.
    pub fn expect_create(&self) -> ExpectationBuilder<Product> {
        self.builder(|response| Expectation::CreateProduct { response })
    }

    /// Expects an `update_product(id, ..)` request.
    pub fn expect_update(&self, id: ProductId) -> ExpectationBuilder<Product> {
        self.builder(move |response| Expectation::UpdateProduct { id, response })
    }

    /// Expects a `delete_product(id)` request.
    pub fn expect_delete(&self, id: ProductId) -> ExpectationBuilder<()> {
        self.builder(move |response| Expectation::DeleteProduct { id, response })
    }

    /// Expects a `list_sellers` request.
    pub fn expect_list_sellers(&self) -> ExpectationBuilder<Vec<Seller>> {
        self.builder(|response| Expectation::ListSellers { response })
    }

    fn builder<T>(
        &self,
        make: impl FnOnce(Result<T, ApiError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            state: self.state.clone(),
            make: Box::new(make),
        }
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn next(&self, call: Call) -> Expectation {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        match state.expectations.pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected request with no expectation left: {call:?}"),
        }
    }
}

/// Builder returned by the `expect_*` methods. Finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<MockState>>,
    make: Box<dyn FnOnce(Result<T, ApiError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, ApiError>) {
        let expectation = (self.make)(response);
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list_products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        match self.next(Call::ListProducts { page, size }) {
            Expectation::ListProducts { page: p, size: s, response } => {
                assert_eq!((p, s), (page, size), "list_products called with unexpected page/size");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: list_products"),
        }
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        match self.next(Call::GetProduct { id }) {
            Expectation::GetProduct { id: expected, response } => {
                assert_eq!(expected, id, "get_product called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: get_product"),
        }
    }

    async fn create_product(&self, payload: ProductPayload) -> Result<Product, ApiError> {
        match self.next(Call::CreateProduct { payload }) {
            Expectation::CreateProduct { response } => response,
            _ => panic!("Unexpected request or expectation mismatch: create_product"),
        }
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: ProductPayload,
    ) -> Result<Product, ApiError> {
        match self.next(Call::UpdateProduct { id, payload }) {
            Expectation::UpdateProduct { id: expected, response } => {
                assert_eq!(expected, id, "update_product called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: update_product"),
        }
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        match self.next(Call::DeleteProduct { id }) {
            Expectation::DeleteProduct { id: expected, response } => {
                assert_eq!(expected, id, "delete_product called with unexpected id");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: delete_product"),
        }
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError> {
        match self.next(Call::ListSellers) {
            Expectation::ListSellers { response } => response,
            _ => panic!("Unexpected request or expectation mismatch: list_sellers"),
        }
    }
}
