use crate::record::SalesRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularityRow {
    pub zip_code: String,
    pub item_description: String,
    pub bottles_sold: u64,
}

// Rows missing either key are left out; blank bottle counts add nothing.
pub fn sales_per_item<'a>(records: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<PopularityRow> {
    let mut totals: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for record in records {
        if let Some(key) = record.zip_and_item() {
            *totals.entry(key).or_insert(0) += record.bottles_sold.unwrap_or(0);
        }
    }

    totals
        .into_iter()
        .map(|((zip, item), bottles_sold)| PopularityRow {
            zip_code: zip.to_string(),
            item_description: item.to_string(),
            bottles_sold,
        })
        .collect()
}

/// Ties on bottles sold go to the item that sorts first, since the stable
/// sort keeps the key order of [`sales_per_item`].
pub fn most_popular_per_zip<'a>(
    records: impl IntoIterator<Item = &'a SalesRecord>,
) -> Vec<PopularityRow> {
    let mut rows = sales_per_item(records);
    rows.sort_by(|a, b| {
        a.zip_code
            .cmp(&b.zip_code)
            .then_with(|| b.bottles_sold.cmp(&a.bottles_sold))
    });
    rows.dedup_by(|later, first| later.zip_code == first.zip_code);
    rows
}

pub fn top_sellers(rows: &[PopularityRow], n: usize) -> Vec<&PopularityRow> {
    let mut ranked: Vec<&PopularityRow> = rows.iter().collect();
    ranked.sort_by(|a, b| b.bottles_sold.cmp(&a.bottles_sold));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
use rust_decimal::Decimal;

#[cfg(test)]
fn sale(zip: &str, item: &str, bottles: u64) -> SalesRecord {
    SalesRecord::new(zip, item, bottles, 1, Decimal::ONE)
}

#[cfg(test)]
fn popular(zip: &str, item: &str, bottles: u64) -> PopularityRow {
    PopularityRow {
        zip_code: zip.to_string(),
        item_description: item.to_string(),
        bottles_sold: bottles,
    }
}

#[test]
fn sums_bottles_per_zip_and_item() {
    let records = vec![
        sale("50010", "Vodka A", 10),
        sale("50010", "Vodka B", 3),
        sale("50010", "Vodka A", 5),
        sale("50314", "Vodka A", 7),
    ];

    assert_eq!(
        sales_per_item(&records),
        vec![
            popular("50010", "Vodka A", 15),
            popular("50010", "Vodka B", 3),
            popular("50314", "Vodka A", 7),
        ]
    );
}

#[test]
fn picks_best_seller_of_each_zip() {
    let records = vec![
        sale("50314", "Black Velvet", 4),
        sale("50010", "Vodka A", 10),
        sale("50314", "Fireball", 9),
        sale("50010", "Vodka B", 15),
        sale("50314", "Black Velvet", 2),
    ];

    assert_eq!(
        most_popular_per_zip(&records),
        vec![popular("50010", "Vodka B", 15), popular("50314", "Fireball", 9)]
    );
}

#[test]
fn ties_go_to_first_item_in_key_order() {
    let records = vec![
        sale("50010", "Whiskey", 8),
        sale("50010", "Gin", 8),
        sale("50010", "Rum", 8),
    ];

    assert_eq!(
        most_popular_per_zip(&records),
        vec![popular("50010", "Gin", 8)]
    );
}

#[test]
fn records_without_zip_or_item_are_not_grouped() {
    let mut no_zip = sale("", "Vodka A", 100);
    no_zip.zip_code = None;
    let mut no_item = sale("50010", "", 100);
    no_item.item_description = None;
    let records = vec![no_zip, no_item, sale("50010", "Vodka B", 1)];

    assert_eq!(
        most_popular_per_zip(&records),
        vec![popular("50010", "Vodka B", 1)]
    );
}

#[test]
fn blank_bottle_counts_add_nothing() {
    let mut blank = sale("50010", "Vodka A", 0);
    blank.bottles_sold = None;
    let records = vec![sale("50010", "Vodka A", 4), blank, sale("50010", "Gin", 2)];

    assert_eq!(
        sales_per_item(&records),
        vec![popular("50010", "Gin", 2), popular("50010", "Vodka A", 4)]
    );
}

#[test]
fn every_zip_gets_exactly_one_maximal_row() {
    let records: Vec<SalesRecord> = (0..60u64)
        .map(|n| {
            let zip = format!("5{:04}", n % 7);
            let item = format!("Item {}", n % 5);
            sale(&zip, &item, (n * 37) % 23)
        })
        .collect();

    let per_item = sales_per_item(&records);
    let best = most_popular_per_zip(&records);

    let mut zips: Vec<&str> = records
        .iter()
        .filter_map(|r| r.zip_code.as_deref())
        .collect();
    zips.sort();
    zips.dedup();
    let best_zips: Vec<&str> = best.iter().map(|r| r.zip_code.as_str()).collect();
    assert_eq!(best_zips, zips);

    for row in &best {
        let max = per_item
            .iter()
            .filter(|r| r.zip_code == row.zip_code)
            .map(|r| r.bottles_sold)
            .max();
        assert_eq!(Some(row.bottles_sold), max);
    }
}

#[test]
fn top_sellers_are_ranked_by_bottles() {
    let rows = vec![
        popular("50010", "Vodka A", 5),
        popular("50314", "Fireball", 90),
        popular("50320", "Gin", 40),
        popular("52001", "Rum", 90),
    ];

    let top: Vec<&str> = top_sellers(&rows, 3)
        .iter()
        .map(|r| r.item_description.as_str())
        .collect();
    assert_eq!(top, vec!["Fireball", "Rum", "Gin"]);
}
