mod error;
mod record;
mod schema;

pub mod chart;
pub mod popularity;
pub mod reader;
pub mod report;
pub mod store_sales;

pub use error::{Result, TallyError};
pub use popularity::PopularityRow;
pub use record::SalesRecord;
pub use schema::{SchemaReducer, DROPPED_COLUMNS, REQUIRED_COLUMNS};
pub use store_sales::{StoreOrder, StoreSalesRow};

use log::info;
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct Tally {
    records: Vec<SalesRecord>,
}

impl Tally {
    pub fn new() -> Self {
        Tally {
            records: Vec::new(),
        }
    }

    pub fn consume(&mut self, records: impl Iterator<Item = SalesRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn most_popular_per_zip(&self) -> Vec<PopularityRow> {
        popularity::most_popular_per_zip(&self.records)
    }

    pub fn sales_per_store(&self) -> Result<Vec<StoreSalesRow>> {
        store_sales::sales_per_store(&self.records)
    }

    /// Writes both reports, separated by an empty line.
    ///
    /// Both are computed before anything is written, so a failure leaves
    /// `target` untouched.
    pub fn write_results<T: io::Write>(&self, mut target: T) -> Result<()> {
        let most_popular = self.most_popular_per_zip();
        let sales_per_store = self.sales_per_store()?;
        info!(
            "{} zip codes, {} stores",
            most_popular.len(),
            sales_per_store.len()
        );

        report::write_most_popular(&most_popular, &mut target)?;
        target.write_all(b"\n")?;
        report::write_store_sales(&sales_per_store, &mut target)?;
        target.flush()?;
        Ok(())
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn scenario() -> Tally {
    let mut tally = Tally::new();
    tally.consume(
        vec![
            SalesRecord::new("50010", "Vodka A", 10, 1, dec!(100.0)),
            SalesRecord::new("50010", "Vodka B", 15, 2, dec!(200.0)),
        ]
        .into_iter(),
    );
    tally
}

#[test]
fn sanity() {
    let tally = scenario();

    let most_popular = tally.most_popular_per_zip();
    assert_eq!(
        most_popular,
        vec![PopularityRow {
            zip_code: "50010".to_string(),
            item_description: "Vodka B".to_string(),
            bottles_sold: 15,
        }]
    );

    let stores = tally.sales_per_store().unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].store_number, 2);
    assert_eq!(stores[0].sale_dollars, dec!(200.0));
    assert_eq!(stores[0].percentage.round_dp(2), dec!(66.67));
    assert_eq!(stores[1].store_number, 1);
    assert_eq!(stores[1].sale_dollars, dec!(100.0));
    assert_eq!(stores[1].percentage.round_dp(2), dec!(33.33));
}

#[test]
fn repeated_runs_agree() {
    let tally = scenario();

    let mut first = Vec::new();
    let mut second = Vec::new();
    tally.write_results(&mut first).unwrap();
    tally.write_results(&mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(tally.records().len(), 2);
}

#[test]
fn empty_tally_writes_nothing() {
    let tally = Tally::new();

    let mut output = Vec::new();
    let result = tally.write_results(&mut output);

    assert!(matches!(result, Err(TallyError::NoSales)));
    assert!(output.is_empty());
}
