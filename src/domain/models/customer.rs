use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub preferred_product: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Value for a template placeholder, `None` when the name is unknown.
    ///
    /// Known attributes that are absent resolve to an empty string.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let value = match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "location" => &self.location,
            "preferred_product" => &self.preferred_product,
            "phone" => return Some(self.phone.as_str()),
            _ => return None,
        };
        Some(value.as_deref().unwrap_or_default())
    }
}

pub const CUSTOMER_ATTRIBUTES: [&str; 5] = [
    "first_name",
    "last_name",
    "location",
    "preferred_product",
    "phone",
];
