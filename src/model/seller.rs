use serde::{Deserialize, Serialize};

use super::product::null_as_default;

/// Server-assigned seller identifier.
pub type SellerId = u64;

/// A payment method a seller accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: u64,
    pub name: String,
}

/// Represents a seller, embedded in products at read time and listed for the add form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_methods: Vec<PaymentMethod>,
}

impl Seller {
    pub fn new(id: SellerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            payment_methods: Vec::new(),
        }
    }
}

/// Reference to a seller by id, as sent in a create payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRef {
    pub id: SellerId,
}
