//! Product catalog domain: records, admin input and normalization rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// A catalog entry as persisted in `products.json` and served to visitors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// Admin-submitted product fields, used for both create and partial update.
///
/// `price` is kept as raw JSON so that numbers and numeric strings are both
/// accepted; anything else is treated as "no usable price".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductInput {
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::input::string_or_none")]
    pub image: Option<String>,
}

/// Read a finite number out of `value`: JSON numbers, or strings that parse as one.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { s.parse::<f64>().ok() }
        }
        _ => None,
    };
    n.filter(|p| p.is_finite())
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Replace `current` only when `incoming` has non-blank text.
fn patch_text(current: &mut String, incoming: &Option<String>) {
    if let Some(v) = incoming.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        *current = v.to_string();
    }
}

fn ensure_non_negative(price: f64) -> Result<f64, ServiceError> {
    if price < 0.0 {
        return Err(ServiceError::Validation("Price must not be negative".into()));
    }
    Ok(price)
}

impl ProductInput {
    /// Build a new product record with the given id.
    ///
    /// Name is required; missing or unusable prices default to 0.
    pub fn into_product(self, id: String) -> Result<Product, ServiceError> {
        let name = trimmed(&self.name);
        if name.is_empty() {
            return Err(ServiceError::Validation("Name is required".into()));
        }
        let price = ensure_non_negative(coerce_price(&self.price).unwrap_or(0.0))?;
        Ok(Product {
            id,
            name,
            price,
            category: trimmed(&self.category),
            description: trimmed(&self.description),
            image: trimmed(&self.image),
        })
    }

    /// Compute the result of applying this input to `product` as a partial update.
    ///
    /// Blank text fields and unusable prices keep the existing value. The
    /// product's id never changes.
    pub fn patched(&self, product: &Product) -> Result<Product, ServiceError> {
        let mut next = product.clone();
        patch_text(&mut next.name, &self.name);
        patch_text(&mut next.category, &self.category);
        patch_text(&mut next.description, &self.description);
        patch_text(&mut next.image, &self.image);
        if let Some(price) = coerce_price(&self.price) {
            next.price = ensure_non_negative(price)?;
        }
        Ok(next)
    }
}

/// Catalog served before an administrator has saved anything.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "p1".into(),
            name: "Smart Desk Lamp".into(),
            price: 39.0,
            category: "Office".into(),
            description: "Adjustable LED desk lamp with warm & cool light modes and USB charging.".into(),
            image: "https://images.pexels.com/photos/667838/pexels-photo-667838.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
        },
        Product {
            id: "p2".into(),
            name: "Wireless Keyboard & Mouse".into(),
            price: 59.0,
            category: "Accessories".into(),
            description: "Slim wireless combo with silent keys and long-life battery, perfect for any desk.".into(),
            image: "https://images.pexels.com/photos/461064/pexels-photo-461064.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
        },
        Product {
            id: "p3".into(),
            name: "USB-C Multiport Hub".into(),
            price: 29.0,
            category: "Electronics".into(),
            description: "Expand your laptop ports with HDMI, USB-A, card reader and fast charging support.".into(),
            image: "https://images.pexels.com/photos/1054397/pexels-photo-1054397.jpeg?auto=compress&cs=tinysrgb&w=800".into(),
        },
    ]
}
