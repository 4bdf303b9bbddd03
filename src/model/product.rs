use serde::{Deserialize, Deserializer, Serialize};

use super::{Seller, SellerRef};

/// Server-assigned product identifier.
pub type ProductId = u64;

/// Number of description characters shown on a list card before truncation.
pub const SUMMARY_LEN: usize = 100;

/// Represents a product in the catalog.
///
/// Products are immutable snapshots of what the catalog service returned. They are
/// replaced wholesale by the next fetch or by the result of a successful submission,
/// never edited in place.
///
/// See [`ProductPayload`] for the body sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default)]
    pub seller: Option<Seller>,
}

impl Product {
    /// Creates a new Product with no description, images or seller.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the catalog service
    /// * `title` - Product title
    /// * `price` - Product price
    pub fn new(id: ProductId, title: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            price,
            images: Vec::new(),
            seller: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seller(mut self, seller: Seller) -> Self {
        self.seller = Some(seller);
        self
    }

    /// The image shown on the product's list card, if it has any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Description as shown on a list card: cut to [`SUMMARY_LEN`] characters with a
    /// trailing `...` when longer.
    pub fn summary(&self) -> String {
        let description = self.description.as_deref().unwrap_or_default();
        if description.chars().count() > SUMMARY_LEN {
            let cut: String = description.chars().take(SUMMARY_LEN).collect();
            format!("{cut}...")
        } else {
            description.to_string()
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent to the catalog service when creating or updating a product.
///
/// `id` is only set for updates; `seller` only for creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_truncates_long_descriptions() {
        let long = "x".repeat(150);
        let product = Product::new(1, "Lamp", 19.99).with_description(long);
        let summary = product.summary();
        assert_eq!(summary.len(), SUMMARY_LEN + 3);
        assert!(summary.ends_with("..."));

        let short = Product::new(2, "Desk", 120.0).with_description("Oak");
        assert_eq!(short.summary(), "Oak");
        assert_eq!(Product::new(3, "Chair", 40.0).summary(), "");
    }

    #[test]
    fn test_decodes_product_without_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": 7, "title": "Lamp", "price": 19.99}"#).unwrap();
        assert_eq!(product.id, 7);
        assert!(product.images.is_empty());
        assert!(product.seller.is_none());
        assert_eq!(product.primary_image(), None);

        let product: Product = serde_json::from_str(
            r#"{"id": 8, "title": "Desk", "price": 120, "description": null, "images": null}"#,
        )
        .unwrap();
        assert_eq!(product.price, 120.0);
        assert!(product.description.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_payload_omits_absent_id_and_seller() {
        let payload = ProductPayload {
            id: None,
            title: "Lamp".into(),
            description: String::new(),
            price: 19.99,
            images: vec![],
            seller: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("seller").is_none());
        assert_eq!(json["price"], 19.99);
    }
}
