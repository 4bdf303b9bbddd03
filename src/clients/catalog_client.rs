use async_trait::async_trait;

use crate::clients::ApiError;
use crate::model::{Page, Product, ProductId, ProductPayload, Seller};

/// The operations the storefront needs from the catalog service.
///
/// Controllers only ever talk to this trait. [`HttpCatalogClient`](crate::clients::HttpCatalogClient)
/// is the real implementation; [`MockCatalog`](crate::clients::mock::MockCatalog) replays
/// scripted responses in tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch page `page` (1-based) of `size` products.
    async fn list_products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError>;

    /// Fetch a single product by id.
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;

    async fn create_product(&self, payload: ProductPayload) -> Result<Product, ApiError>;

    async fn update_product(
        &self,
        id: ProductId,
        payload: ProductPayload,
    ) -> Result<Product, ApiError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    /// Fetch every seller, for the add form's seller selection.
    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError>;
}

#[async_trait]
impl<C: CatalogApi + ?Sized> CatalogApi for std::sync::Arc<C> {
    async fn list_products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        (**self).list_products(page, size).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        (**self).get_product(id).await
    }

    async fn create_product(&self, payload: ProductPayload) -> Result<Product, ApiError> {
        (**self).create_product(payload).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: ProductPayload,
    ) -> Result<Product, ApiError> {
        (**self).update_product(id, payload).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        (**self).delete_product(id).await
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError> {
        (**self).list_sellers().await
    }
}
