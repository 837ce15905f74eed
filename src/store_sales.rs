use crate::error::{Result, TallyError};
use crate::record::SalesRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSalesRow {
    pub store_number: u32,
    pub sale_dollars: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreOrder {
    #[default]
    Percentage,
    StoreNumber,
}

pub fn sales_per_store<'a>(
    records: impl IntoIterator<Item = &'a SalesRecord>,
) -> Result<Vec<StoreSalesRow>> {
    sales_per_store_ordered(records, StoreOrder::Percentage)
}

pub fn sales_per_store_ordered<'a>(
    records: impl IntoIterator<Item = &'a SalesRecord>,
    order: StoreOrder,
) -> Result<Vec<StoreSalesRow>> {
    let mut totals: BTreeMap<u32, Decimal> = BTreeMap::new();
    // rows without a store are not grouped, blank amounts add nothing
    for record in records {
        if let Some(store_number) = record.store_number {
            *totals.entry(store_number).or_default() += record.sale_dollars.unwrap_or_default();
        }
    }
    if totals.is_empty() {
        return Err(TallyError::NoSales);
    }

    let grand_total: Decimal = totals.values().sum();
    if grand_total.is_zero() {
        return Err(TallyError::ZeroTotalSales);
    }

    let mut rows: Vec<StoreSalesRow> = totals
        .into_iter()
        .map(|(store_number, sale_dollars)| StoreSalesRow {
            store_number,
            sale_dollars,
            percentage: sale_dollars / grand_total * Decimal::ONE_HUNDRED,
        })
        .collect();

    if order == StoreOrder::Percentage {
        rows.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    }
    Ok(rows)
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn sale(store: u32, dollars: Decimal) -> SalesRecord {
    SalesRecord::new("50010", "Vodka A", 1, store, dollars)
}

#[test]
fn sums_sales_per_store() {
    let records = vec![
        sale(1, dec!(100.0)),
        sale(2, dec!(200.0)),
        sale(1, dec!(50.25)),
    ];

    let rows = sales_per_store(&records).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].store_number, 2);
    assert_eq!(rows[0].sale_dollars, dec!(200.0));
    assert_eq!(rows[1].store_number, 1);
    assert_eq!(rows[1].sale_dollars, dec!(150.25));
}

#[test]
fn percentages_add_up_to_one_hundred() {
    let records: Vec<SalesRecord> = (1..=37u32)
        .map(|n| sale(n % 11, Decimal::new(i64::from(n) * 1733, 2)))
        .collect();

    let rows = sales_per_store(&records).unwrap();

    let total: Decimal = rows.iter().map(|r| r.percentage).sum();
    assert!((total - dec!(100)).abs() < dec!(0.000001));
}

#[test]
fn store_totals_conserve_sales() {
    let records = vec![
        sale(7, dec!(12.99)),
        sale(3, dec!(0.01)),
        sale(7, dec!(1000)),
        sale(9, dec!(45.5)),
    ];

    let rows = sales_per_store(&records).unwrap();

    let input: Decimal = records.iter().filter_map(|r| r.sale_dollars).sum();
    let output: Decimal = rows.iter().map(|r| r.sale_dollars).sum();
    assert_eq!(input, output);
}

#[test]
fn equal_shares_keep_store_number_order() {
    let records = vec![sale(30, dec!(5)), sale(10, dec!(5)), sale(20, dec!(5))];

    let stores: Vec<u32> = sales_per_store(&records)
        .unwrap()
        .iter()
        .map(|r| r.store_number)
        .collect();
    assert_eq!(stores, vec![10, 20, 30]);
}

#[test]
fn store_number_order() {
    let records = vec![sale(2, dec!(200.0)), sale(1, dec!(100.0))];

    let rows = sales_per_store_ordered(&records, StoreOrder::StoreNumber).unwrap();

    assert_eq!(rows[0].store_number, 1);
    assert_eq!(rows[1].store_number, 2);
}

#[test]
fn no_records_is_an_error() {
    let records: Vec<SalesRecord> = Vec::new();

    assert!(matches!(sales_per_store(&records), Err(TallyError::NoSales)));
}

#[test]
fn zero_total_is_an_error() {
    let records = vec![sale(1, dec!(0)), sale(2, dec!(0.00))];

    assert!(matches!(
        sales_per_store(&records),
        Err(TallyError::ZeroTotalSales)
    ));
}

#[test]
fn blank_store_or_amount_only_drops_that_cell() {
    let mut no_store = sale(1, dec!(30.00));
    no_store.store_number = None;
    let mut no_amount = sale(2, dec!(0));
    no_amount.sale_dollars = None;
    let records = vec![sale(1, dec!(100.00)), sale(2, dec!(50.00)), no_store, no_amount];

    let rows = sales_per_store(&records).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].store_number, 1);
    assert_eq!(rows[0].sale_dollars, dec!(100.00));
    assert_eq!(rows[1].store_number, 2);
    assert_eq!(rows[1].sale_dollars, dec!(50.00));
}

#[test]
fn only_storeless_rows_is_an_error() {
    let mut no_store = sale(1, dec!(30.00));
    no_store.store_number = None;

    assert!(matches!(sales_per_store(&[no_store]), Err(TallyError::NoSales)));
}
