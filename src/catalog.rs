use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Converts a JSON number into a decimal amount.
///
/// Integers convert exactly, floats go through their shortest representation
/// so `10.1` becomes `10.1` rather than its binary expansion. Returns `None`
/// for values a `Decimal` cannot hold.
pub fn to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(n) = number.as_u64() {
        return Some(Decimal::from(n));
    }
    if let Some(n) = number.as_i64() {
        return Some(Decimal::from(n));
    }
    number.as_f64().and_then(Decimal::from_f64)
}

pub const PRICE_KEY: &str = "price";

/// Why a matched catalog entry cannot be used to cost a line item.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BadPrice {
    Missing,
    Invalid,
}

/// Catalog entries are kept loose: an entry with an unusable price only
/// affects the line items that refer to it.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Product {
    #[serde(default)]
    title: Value,
    #[serde(default, deserialize_with = "present")]
    price: Option<Value>,
}

// `"price": null` is a present but unusable price, not a missing one.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Product {
    #[cfg(test)]
    pub fn new(title: &str, price: Value) -> Product {
        Product {
            title: Value::from(title),
            price: Some(price),
        }
    }
    /// Entries without a string title never match.
    pub fn title(&self) -> Option<&str> {
        self.title.as_str()
    }
    pub fn price(&self) -> Result<Decimal, BadPrice> {
        let number = match self.price.as_ref().ok_or(BadPrice::Missing)? {
            Value::Number(number) => number,
            _ => return Err(BadPrice::Invalid),
        };
        match to_decimal(number) {
            Some(price) if price >= Decimal::ZERO => Ok(price),
            _ => Err(BadPrice::Invalid),
        }
    }
}

/// Price list the sales are costed against. Titles are not required to be
/// unique; lookups resolve to the first entry.
#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[cfg(test)]
    pub fn new(products: Vec<Product>) -> Catalog {
        Catalog { products }
    }
    pub fn len(&self) -> usize {
        self.products.len()
    }
    /// find_price returns the unit price of the first product titled exactly
    /// `title`, or `None` when no entry carries that title
    pub fn find_price(&self, title: &str) -> Option<Result<Decimal, BadPrice>> {
        self.products
            .iter()
            .find(|product| product.title() == Some(title))
            .map(Product::price)
    }
}
