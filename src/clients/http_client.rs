//! reqwest-backed implementation of [`CatalogApi`].
//!
//! Every endpoint answers with an [`Envelope`]. The body is decoded as an envelope first,
//! whatever the HTTP status; only when that fails does the HTTP status decide between
//! [`ApiError::Http`] and [`ApiError::Decode`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::clients::{ApiError, CatalogApi};
use crate::config::ClientConfig;
use crate::model::{Envelope, Page, Product, ProductId, ProductPayload, Seller};

/// Client for the catalog service's REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    base_url: String,
    client: Client,
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    async fn send(&self, request: RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.send(request).await?;
        decode_envelope(status, &body)
    }
}

/// Decodes an envelope body into its `data`, which must be present.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_optional_envelope(status, body)?.ok_or(ApiError::MissingData)
}

/// Decodes an envelope body whose `data` may legitimately be `null` (e.g. delete).
pub fn decode_optional_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Option<T>, ApiError> {
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => return Err(ApiError::Decode(e.to_string())),
        Err(_) => return Err(ApiError::Http { status }),
    };

    if !envelope.is_success() {
        return Err(ApiError::Application {
            message: envelope.message,
        });
    }
    debug!(status, code = ?envelope.code, "Envelope ok");
    Ok(envelope.data)
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn list_products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        debug!("Sending request");
        let request = self
            .request(Method::GET, "products")
            .query(&[("page", page), ("size", size)]);
        let result: Result<Page<Product>, ApiError> = self.fetch(request).await;
        match &result {
            Ok(p) => info!(
                page = p.page,
                total_pages = p.total_pages,
                count = p.content.len(),
                "Listed products"
            ),
            Err(e) => warn!(error = %e, "List products failed"),
        }
        result
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        debug!("Sending request");
        let result: Result<Product, ApiError> = self
            .fetch(self.request(Method::GET, &format!("products/{id}")))
            .await;
        if let Err(e) = &result {
            warn!(error = %e, "Get product failed");
        }
        result
    }

    #[instrument(skip(self, payload))]
    async fn create_product(&self, payload: ProductPayload) -> Result<Product, ApiError> {
        debug!(?payload, "create_product called");
        let result: Result<Product, ApiError> = self
            .fetch(self.request(Method::POST, "products").json(&payload))
            .await;
        match &result {
            Ok(product) => info!(id = product.id, "Created product"),
            Err(e) => warn!(error = %e, "Create product failed"),
        }
        result
    }

    #[instrument(skip(self, payload))]
    async fn update_product(
        &self,
        id: ProductId,
        payload: ProductPayload,
    ) -> Result<Product, ApiError> {
        debug!(?payload, "update_product called");
        let result: Result<Product, ApiError> = self
            .fetch(
                self.request(Method::PUT, &format!("products/{id}"))
                    .json(&payload),
            )
            .await;
        match &result {
            Ok(_) => info!("Updated product"),
            Err(e) => warn!(error = %e, "Update product failed"),
        }
        result
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        debug!("Sending request");
        let (status, body) = self
            .send(self.request(Method::DELETE, &format!("products/{id}")))
            .await?;
        // 204 responses may come back without a body at all.
        if body.trim().is_empty() && (200..300).contains(&status) {
            info!("Deleted product");
            return Ok(());
        }
        match decode_optional_envelope::<serde_json::Value>(status, &body) {
            Ok(_) => {
                info!("Deleted product");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Delete product failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError> {
        debug!("Sending request");
        let result: Result<Vec<Seller>, ApiError> =
            self.fetch(self.request(Method::GET, "sellers")).await;
        match &result {
            Ok(sellers) => info!(count = sellers.len(), "Listed sellers"),
            Err(e) => warn!(error = %e, "List sellers failed"),
        }
        result
    }
}
