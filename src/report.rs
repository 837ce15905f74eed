use crate::error::Result;
use crate::popularity::PopularityRow;
use crate::store_sales::StoreSalesRow;
use csv::WriterBuilder;
use rust_decimal::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::io;

const MOST_POPULAR_HEADER: [&str; 3] = ["zip_code", "item_description", "bottles_sold"];
const STORE_SALES_HEADER: [&str; 3] = ["store_number", "sale_dollars", "sale_dollars_percentage"];

fn two_places(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

impl Serialize for StoreSalesRow {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("StoreSalesRow", 3)?;
        state.serialize_field("store_number", &self.store_number)?;
        state.serialize_field("sale_dollars", &two_places(self.sale_dollars))?;
        state.serialize_field("sale_dollars_percentage", &two_places(self.percentage))?;
        state.end()
    }
}

fn write_table<T, R>(header: &[&str], rows: &[R], target: T) -> Result<()>
where
    T: io::Write,
    R: Serialize,
{
    // header is written by hand so that empty tables still carry one
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(target);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_most_popular<T: io::Write>(rows: &[PopularityRow], target: T) -> Result<()> {
    write_table(&MOST_POPULAR_HEADER, rows, target)
}

pub fn write_store_sales<T: io::Write>(rows: &[StoreSalesRow], target: T) -> Result<()> {
    write_table(&STORE_SALES_HEADER, rows, target)
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[test]
fn rounds_to_two_places() {
    assert_eq!(two_places(dec!(200)), "200.00");
    assert_eq!(two_places(dec!(33.333333)), "33.33");
    assert_eq!(two_places(dec!(66.666667)), "66.67");
    assert_eq!(two_places(dec!(0.125)), "0.13");
}

#[test]
fn writes_most_popular_table() {
    let rows = vec![PopularityRow {
        zip_code: "50010".to_string(),
        item_description: "Black Velvet".to_string(),
        bottles_sold: 42,
    }];

    let mut output = Vec::new();
    write_most_popular(&rows, &mut output).unwrap();

    assert_eq!(
        output,
        b"zip_code,item_description,bottles_sold\n50010,Black Velvet,42\n"
    );
}

#[test]
fn writes_store_sales_table() {
    let rows = vec![StoreSalesRow {
        store_number: 2633,
        sale_dollars: dec!(1250.5),
        percentage: dec!(12.3456),
    }];

    let mut output = Vec::new();
    write_store_sales(&rows, &mut output).unwrap();

    assert_eq!(
        output,
        b"store_number,sale_dollars,sale_dollars_percentage\n2633,1250.50,12.35\n"
    );
}

#[test]
fn empty_table_keeps_its_header() {
    let mut output = Vec::new();
    write_most_popular(&[], &mut output).unwrap();

    assert_eq!(output, b"zip_code,item_description,bottles_sold\n");
}
