use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use rust_decimal::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    total: Decimal,
    elapsed: Duration,
}

impl SalesReport {
    pub fn new(total: Decimal, elapsed: Duration) -> SalesReport {
        SalesReport { total, elapsed }
    }
    /// write_to replaces the contents of `path` with the report
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for SalesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self
            .total
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        writeln!(f, "Total sales cost: ${:.2}", total)?;
        writeln!(f, "Elapsed time: {:.6} seconds", self.elapsed.as_secs_f64())
    }
}
