use crate::popularity::{top_sellers, PopularityRow};
use crate::store_sales::StoreSalesRow;
use rust_decimal::prelude::*;

pub const ANNOTATED_ITEMS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub zip_code: String,
    pub bottles_sold: u64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub position: usize,
    pub store_number: u32,
    pub percentage: Decimal,
    // colormap input, 0 to 1
    pub intensity: f64,
}

pub fn scatter_points(rows: &[PopularityRow], annotate: usize) -> Vec<ScatterPoint> {
    let labelled = top_sellers(rows, annotate);
    rows.iter()
        .map(|row| ScatterPoint {
            zip_code: row.zip_code.clone(),
            bottles_sold: row.bottles_sold,
            label: labelled
                .iter()
                .any(|top| std::ptr::eq(*top, row))
                .then(|| row.item_description.clone()),
        })
        .collect()
}

pub fn bar_segments(rows: &[StoreSalesRow]) -> Vec<BarSegment> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| BarSegment {
            position,
            store_number: row.store_number,
            percentage: row.percentage,
            intensity: (row.percentage / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or_default()
                .clamp(0.0, 1.0),
        })
        .collect()
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
fn popular(zip: &str, item: &str, bottles: u64) -> PopularityRow {
    PopularityRow {
        zip_code: zip.to_string(),
        item_description: item.to_string(),
        bottles_sold: bottles,
    }
}

#[test]
fn labels_only_the_best_sellers() {
    let rows = vec![
        popular("50010", "Vodka A", 5),
        popular("50314", "Fireball", 90),
        popular("50320", "Gin", 40),
    ];

    let points = scatter_points(&rows, 2);

    let labels: Vec<Option<&str>> = points.iter().map(|p| p.label.as_deref()).collect();
    assert_eq!(labels, vec![None, Some("Fireball"), Some("Gin")]);
    assert_eq!(points[0].zip_code, "50010");
    assert_eq!(points[1].bottles_sold, 90);
}

#[test]
fn duplicate_items_are_labelled_per_row() {
    let rows = vec![
        popular("50010", "Fireball", 10),
        popular("50314", "Fireball", 90),
    ];

    let points = scatter_points(&rows, 1);

    assert_eq!(points[0].label, None);
    assert_eq!(points[1].label.as_deref(), Some("Fireball"));
}

#[test]
fn bars_follow_row_order() {
    let rows = vec![
        StoreSalesRow {
            store_number: 2,
            sale_dollars: dec!(300),
            percentage: dec!(75),
        },
        StoreSalesRow {
            store_number: 1,
            sale_dollars: dec!(100),
            percentage: dec!(25),
        },
    ];

    let bars = bar_segments(&rows);

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].position, 0);
    assert_eq!(bars[0].store_number, 2);
    assert!((bars[0].intensity - 0.75).abs() < 1e-12);
    assert_eq!(bars[1].position, 1);
    assert!((bars[1].intensity - 0.25).abs() < 1e-12);
}
