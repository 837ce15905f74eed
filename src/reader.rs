use crate::error::{Result, TallyError};
use crate::record::SalesRecord;
use crate::schema::SchemaReducer;
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use std::fs::File;
use std::io;
use std::path::Path;

pub fn read_sales_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TallyError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_sales(file)?;
    info!("loaded {} sales records from {}", records.len(), path.display());
    Ok(records)
}

// The header row is checked before any row is read; unparsable rows are skipped.
pub fn read_sales<R: io::Read>(source: R) -> Result<Vec<SalesRecord>> {
    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(source);
    let reducer = SchemaReducer::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!("could not read line {}, will be skipped: {}", line, err);
                continue;
            }
        };
        match reducer
            .project(&row)
            .deserialize::<SalesRecord>(Some(reducer.headers()))
        {
            Ok(record) => records.push(record),
            Err(err) => warn!("could not parse line {}, will be skipped: {}", line, err),
        }
    }
    Ok(records)
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
const HEADER: &str = "invoice_and_item_number,date,store_number,store_name,address,city,zip_code,\
store_location,county_number,county,category,category_name,vendor_number,vendor_name,item_number,\
item_description,pack,bottle_volume_ml,state_bottle_cost,state_bottle_retail,bottles_sold,\
sale_dollars,volume_sold_liters,volume_sold_gallons";

#[cfg(test)]
fn row(store: u32, zip: &str, item: &str, bottles: &str, dollars: &str) -> String {
    format!(
        "INV-1,2016-01-04,{},Hy-Vee,1 Main St,Ames,{},,85,Story,1031100,VODKA,260,Diageo,38176,{},12,750,7.47,11.21,{},{},9.0,2.38",
        store, zip, item, bottles, dollars
    )
}

#[test]
fn reads_reduced_records() {
    let csv = format!(
        "{}\n{}\n{}\n",
        HEADER,
        row(2633, "50010", "Titos Handmade Vodka", "12", "134.52"),
        row(4829, "50314", "Black Velvet", "6", "63.00")
    );

    let records = read_sales(csv.as_bytes()).unwrap();

    assert_eq!(
        records,
        vec![
            SalesRecord::new("50010", "Titos Handmade Vodka", 12, 2633, dec!(134.52)),
            SalesRecord::new("50314", "Black Velvet", 6, 4829, dec!(63.00)),
        ]
    );
}

#[test]
fn empty_zip_code_reads_as_none() {
    let csv = format!("{}\n{}\n", HEADER, row(2633, "", "Black Velvet", "6", "63.00"));

    let records = read_sales(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].zip_code, None);
    assert_eq!(records[0].item_description.as_deref(), Some("Black Velvet"));
}

#[test]
fn unparsable_rows_are_skipped() {
    let csv = format!(
        "{}\n{}\n{}\n",
        HEADER,
        row(2633, "50010", "Black Velvet", "lots", "63.00"),
        row(2633, "50010", "Black Velvet", "6", "63.00")
    );

    let records = read_sales(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bottles_sold, Some(6));
}

#[test]
fn missing_column_fails_before_reading_rows() {
    let csv = "zip_code,item_description,bottles_sold,store_number,sale_dollars\n50010,Vodka A,1,1,1.00\n";

    match read_sales(csv.as_bytes()) {
        Err(TallyError::MissingColumn(name)) => assert_eq!(name, "invoice_and_item_number"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_file_is_reported() {
    let result = read_sales_from_path("this/file/does/not/exist.csv");

    assert!(matches!(result, Err(TallyError::MissingInput { .. })));
}

#[test]
fn blank_numeric_cells_keep_the_row() {
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        row(1, "50010", "Vodka A", "10", "100.00"),
        row(2, "50010", "Vodka B", "", "50.00"),
        row(3, "50010", "Vodka A", "20", ""),
    );
    let csv = csv.replacen(",3,Hy-Vee,", ",,Hy-Vee,", 1);

    let records = read_sales(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].bottles_sold, None);
    assert_eq!(records[1].sale_dollars, Some(dec!(50.00)));
    assert_eq!(records[2].store_number, None);
    assert_eq!(records[2].bottles_sold, Some(20));
    assert_eq!(records[2].sale_dollars, None);
}

#[test]
fn item_whitespace_is_kept_apart() {
    let csv = format!(
        "{}\n{}\n{}\n",
        HEADER,
        row(1, "50010", "Vodka A ", " 10 ", "100.00"),
        row(1, "50010", "Vodka A", "5", "50.00"),
    );

    let records = read_sales(csv.as_bytes()).unwrap();

    assert_eq!(records[0].item_description.as_deref(), Some("Vodka A "));
    assert_eq!(records[0].bottles_sold, Some(10));
    assert_eq!(records[1].item_description.as_deref(), Some("Vodka A"));
}
