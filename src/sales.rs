use std::convert::TryFrom;

use rust_decimal::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::to_decimal;

pub const PRODUCT_KEY: &str = "Product";
pub const QUANTITY_KEY: &str = "Quantity";

/// A line item that could not be costed. The item is skipped and the run
/// carries on.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum LineItemIssue {
    #[error("invalid sale data (missing key '{field}'): {item}")]
    MissingField { field: &'static str, item: Value },
    #[error("product not found in catalogue: {product}")]
    UnknownProduct { product: String },
    #[error("invalid sale data (type error): {item}")]
    TypeMismatch { item: Value },
    #[error("invalid sale data (negative quantity): {item}")]
    NegativeQuantity { item: Value },
}

impl LineItemIssue {
    pub fn kind(&self) -> &'static str {
        match self {
            LineItemIssue::MissingField { .. } => "missing_field",
            LineItemIssue::UnknownProduct { .. } => "unknown_product",
            LineItemIssue::TypeMismatch { .. } => "type_mismatch",
            LineItemIssue::NegativeQuantity { .. } => "negative_quantity",
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct Sale {
    #[serde(default)]
    items: Option<Value>,
}

impl Sale {
    #[cfg(test)]
    pub fn new(items: Vec<Value>) -> Sale {
        Sale {
            items: Some(Value::Array(items)),
        }
    }
    /// items are kept raw so that malformed entries survive loading. A
    /// missing or null `items` is an empty sale; anything but an array is
    /// reported against the whole sale.
    pub fn items(&self) -> Result<&[Value], LineItemIssue> {
        match &self.items {
            None => Ok(&[][..]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(LineItemIssue::TypeMismatch {
                item: other.clone(),
            }),
        }
    }
}

/// A line item with both required keys present. The product only has to
/// match a catalog title; the quantity is validated after pricing.
#[derive(Debug, PartialEq)]
pub struct LineItem<'a> {
    pub product: &'a Value,
    quantity: &'a Value,
    raw: &'a Value,
}

impl<'a> TryFrom<&'a Value> for LineItem<'a> {
    type Error = LineItemIssue;
    fn try_from(raw: &'a Value) -> Result<LineItem<'a>, LineItemIssue> {
        let fields = raw.as_object().ok_or_else(|| LineItemIssue::TypeMismatch {
            item: raw.clone(),
        })?;
        let missing = |field: &'static str| LineItemIssue::MissingField {
            field,
            item: raw.clone(),
        };
        let product = fields.get(PRODUCT_KEY).ok_or_else(|| missing(PRODUCT_KEY))?;
        let quantity = fields.get(QUANTITY_KEY).ok_or_else(|| missing(QUANTITY_KEY))?;
        Ok(LineItem {
            product,
            quantity,
            raw,
        })
    }
}

impl<'a> LineItem<'a> {
    /// Name used in diagnostics. Non-string products are shown as JSON.
    pub fn product_name(&self) -> String {
        match self.product {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        }
    }
    pub fn quantity(&self) -> Result<Decimal, LineItemIssue> {
        let quantity = match self.quantity {
            Value::Number(number) => to_decimal(number).ok_or_else(|| self.type_mismatch())?,
            _ => return Err(self.type_mismatch()),
        };
        if quantity < Decimal::ZERO {
            return Err(LineItemIssue::NegativeQuantity {
                item: self.raw.clone(),
            });
        }
        Ok(quantity)
    }
    pub fn type_mismatch(&self) -> LineItemIssue {
        LineItemIssue::TypeMismatch {
            item: self.raw.clone(),
        }
    }
}
