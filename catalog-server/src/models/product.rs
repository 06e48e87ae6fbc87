//! Product record and the create/update payload

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// Product as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

/// Body of `POST /product/new` and `PUT /product/update/{id}`.
///
/// Every field is optional. On update, an absent field keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl ProductInput {
    /// Check the numeric invariants: price and stock are never negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            if !price.is_finite() {
                return Err(ValidationError::NotFinite { field: "price" });
            }
            if price < 0.0 {
                return Err(ValidationError::Negative { field: "price" });
            }
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            return Err(ValidationError::Negative { field: "stock" });
        }
        Ok(())
    }

    /// Apply this input on top of an existing product, keeping fields it leaves unset.
    pub fn coalesce(self, current: Product) -> Product {
        Product {
            id: current.id,
            name: self.name.or(current.name),
            description: self.description.or(current.description),
            price: self.price.or(current.price),
            stock: self.stock.or(current.stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: Some("Lamp".into()),
            description: Some("Desk lamp".into()),
            price: Some(12.5),
            stock: Some(5),
        }
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(ProductInput::default().validate().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let input = ProductInput {
            price: Some(-0.01),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::Negative { field: "price" })
        );
    }

    #[test]
    fn nan_price_rejected() {
        let input = ProductInput {
            price: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::NotFinite { field: "price" })
        );
    }

    #[test]
    fn negative_stock_rejected() {
        let input = ProductInput {
            stock: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::Negative { field: "stock" })
        );
    }

    #[test]
    fn coalesce_keeps_unset_fields() {
        let current = stored();
        let input = ProductInput {
            price: Some(19.99),
            ..Default::default()
        };
        let merged = input.coalesce(current.clone());

        assert_eq!(merged.id, current.id);
        assert_eq!(merged.price, Some(19.99));
        assert_eq!(merged.stock, Some(5));
        assert_eq!(merged.name.as_deref(), Some("Lamp"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let input: ProductInput = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
        assert_eq!(input.price, Some(3.5));
        assert!(input.name.is_none());
        assert!(input.stock.is_none());
    }
}
