use std::convert::TryFrom;

use rust_decimal::prelude::*;
use serde_json::Value;
use tracing::{debug, error};

use crate::catalog::{BadPrice, Catalog, PRICE_KEY};
use crate::sales::{LineItem, LineItemIssue, Sale};

/// Receives every line item the engine had to skip, in processing order.
pub trait IssueSink {
    fn record(&mut self, issue: LineItemIssue);
}

/// Collects issues in memory.
impl IssueSink for Vec<LineItemIssue> {
    fn record(&mut self, issue: LineItemIssue) {
        self.push(issue);
    }
}

/// Reports each issue twice: an error event for the log file and a line on
/// stdout for whoever is running the tool.
pub struct ConsoleSink;

impl IssueSink for ConsoleSink {
    fn record(&mut self, issue: LineItemIssue) {
        match &issue {
            LineItemIssue::UnknownProduct { product } => {
                error!(kind = issue.kind(), product = product.as_str(), "{}", issue)
            }
            _ => error!(kind = issue.kind(), "{}", issue),
        }
        println!("Error: {}", issue);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostSummary {
    pub total: Decimal,
    pub counted: usize,
    pub skipped: usize,
}

pub struct CostEngine<'a> {
    catalog: &'a Catalog,
    issues: &'a mut dyn IssueSink,
}

impl<'a> CostEngine<'a> {
    pub fn new(catalog: &'a Catalog, issues: &'a mut dyn IssueSink) -> CostEngine<'a> {
        CostEngine { catalog, issues }
    }

    /// Cost of a single line item. Never touches the sink.
    pub fn line_cost(&self, raw: &Value) -> Result<Decimal, LineItemIssue> {
        let item = LineItem::try_from(raw)?;
        let price = item
            .product
            .as_str()
            .and_then(|name| self.catalog.find_price(name))
            .ok_or_else(|| LineItemIssue::UnknownProduct {
                product: item.product_name(),
            })?
            .map_err(|bad| match bad {
                BadPrice::Missing => LineItemIssue::MissingField {
                    field: PRICE_KEY,
                    item: raw.clone(),
                },
                BadPrice::Invalid => item.type_mismatch(),
            })?;
        let quantity = item.quantity()?;
        price
            .checked_mul(quantity)
            .ok_or_else(|| item.type_mismatch())
    }

    fn skip(&mut self, sale: usize, issue: LineItemIssue, summary: &mut CostSummary) {
        debug!(sale, kind = issue.kind(), "Skipped line item");
        summary.skipped += 1;
        self.issues.record(issue);
    }

    pub fn total_cost(&mut self, sales: &[Sale]) -> CostSummary {
        let mut summary = CostSummary::default();
        for (sale, items) in sales.iter().map(Sale::items).enumerate() {
            let items = match items {
                Ok(items) => items,
                Err(issue) => {
                    self.skip(sale, issue, &mut summary);
                    continue;
                }
            };
            for raw in items {
                match self
                    .line_cost(raw)
                    .and_then(|cost| add(summary.total, cost, raw))
                {
                    Ok(total) => {
                        summary.total = total;
                        summary.counted += 1;
                    }
                    Err(issue) => self.skip(sale, issue, &mut summary),
                }
            }
        }
        summary
    }
}

fn add(total: Decimal, cost: Decimal, raw: &Value) -> Result<Decimal, LineItemIssue> {
    total
        .checked_add(cost)
        .ok_or_else(|| LineItemIssue::TypeMismatch { item: raw.clone() })
}

/// total_cost prices every line item of every sale against the catalog
pub fn total_cost(catalog: &Catalog, sales: &[Sale], issues: &mut dyn IssueSink) -> CostSummary {
    CostEngine::new(catalog, issues).total_cost(sales)
}
