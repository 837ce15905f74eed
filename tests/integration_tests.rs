use rust_decimal::Decimal;
use tally::reader::read_sales;
use tally::{Tally, TallyError};

const HEADER: &str = "invoice_and_item_number,date,store_number,store_name,address,city,zip_code,\
store_location,county_number,county,category,category_name,vendor_number,vendor_name,item_number,\
item_description,pack,bottle_volume_ml,state_bottle_cost,state_bottle_retail,bottles_sold,\
sale_dollars,volume_sold_liters,volume_sold_gallons";

fn row(store: u32, zip: &str, item: &str, bottles: &str, dollars: &str) -> String {
    format!(
        "INV-{store}-{bottles},2019-03-12,{store},Store {store},12 Elm St,Des Moines,{zip},,77,Polk,\
1012100,CANADIAN WHISKIES,260,Diageo,11296,{item},6,1750,15.07,22.61,{bottles},{dollars},10.5,2.77"
    )
}

fn tally_of(lines: &[String]) -> Tally {
    let mut csv = String::from(HEADER);
    for line in lines {
        csv.push('\n');
        csv.push_str(line);
    }
    csv.push('\n');

    let mut tally = Tally::new();
    tally.consume(read_sales(csv.as_bytes()).unwrap().into_iter());
    tally
}

#[test]
fn sanity() {
    let tally = tally_of(&[
        row(1, "50010", "Vodka A", "10", "100.0"),
        row(2, "50010", "Vodka B", "15", "200.0"),
    ]);

    let mut output = Vec::new();
    tally.write_results(&mut output).unwrap();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "zip_code,item_description,bottles_sold\n\
         50010,Vodka B,15\n\
         \n\
         store_number,sale_dollars,sale_dollars_percentage\n\
         2,200.00,66.67\n\
         1,100.00,33.33\n"
    );
}

#[test]
fn several_zip_codes_and_stores() {
    let tally = tally_of(&[
        row(2633, "50314", "Black Velvet", "12", "94.68"),
        row(4829, "50010", "Fireball Cinnamon Whiskey", "24", "300.00"),
        row(2633, "50314", "Hawkeye Vodka", "12", "60.00"),
        row(3773, "50010", "Titos Handmade Vodka", "6", "120.00"),
        row(4829, "50314", "Black Velvet", "3", "25.32"),
        row(3773, "", "Unknown Item", "500", "100.00"),
        row(2633, "50010", "Broken Row", "n/a", "1.00"),
    ]);

    let mut output = Vec::new();
    tally.write_results(&mut output).unwrap();

    // 2633: 154.68, 4829: 325.32, 3773: 220.00 of 700.00
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "zip_code,item_description,bottles_sold\n\
         50010,Fireball Cinnamon Whiskey,24\n\
         50314,Black Velvet,15\n\
         \n\
         store_number,sale_dollars,sale_dollars_percentage\n\
         4829,325.32,46.47\n\
         3773,220.00,31.43\n\
         2633,154.68,22.10\n"
    );
}

#[test]
fn blank_cells_only_leave_out_their_own_value() {
    let no_store = row(9, "50010", "Vodka A", "20", "30.00").replace(",9,Store 9,", ",,Store 9,");
    let tally = tally_of(&[
        row(1, "50010", "Vodka A", "10", "100.00"),
        row(2, "50010", "Vodka B", "", "50.00"),
        no_store,
    ]);

    let mut output = Vec::new();
    tally.write_results(&mut output).unwrap();

    assert_eq!(tally.records().len(), 3);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "zip_code,item_description,bottles_sold\n\
         50010,Vodka A,30\n\
         \n\
         store_number,sale_dollars,sale_dollars_percentage\n\
         1,100.00,66.67\n\
         2,50.00,33.33\n"
    );
}

#[test]
fn percentages_and_totals_hold_for_the_loaded_snapshot() {
    let lines: Vec<String> = (0..40u32)
        .map(|n| {
            row(
                1000 + n % 9,
                &format!("5{:04}", n % 6),
                &format!("Item {}", n % 4),
                &format!("{}", n % 13 + 1),
                &format!("{}.{:02}", n * 7 + 3, n % 100),
            )
        })
        .collect();
    let tally = tally_of(&lines);

    let stores = tally.sales_per_store().unwrap();
    let percent: Decimal = stores.iter().map(|s| s.percentage).sum();
    assert!((percent - Decimal::ONE_HUNDRED).abs() < Decimal::new(1, 6));

    let input: Decimal = tally
        .records()
        .iter()
        .filter(|r| r.store_number.is_some())
        .filter_map(|r| r.sale_dollars)
        .sum();
    let output: Decimal = stores.iter().map(|s| s.sale_dollars).sum();
    assert_eq!(input, output);

    assert_eq!(tally.most_popular_per_zip().len(), 6);
    assert_eq!(tally.most_popular_per_zip(), tally.most_popular_per_zip());
}

#[test]
fn header_without_dropped_columns_is_rejected() {
    let csv = "zip_code,item_description,bottles_sold,store_number,sale_dollars\n\
               50010,Vodka A,10,1,100.0\n";

    let result = read_sales(csv.as_bytes());

    assert!(matches!(result, Err(TallyError::MissingColumn(_))));
}

#[test]
fn header_only_input_has_no_store_report() {
    let tally = tally_of(&[]);

    let mut output = Vec::new();
    let result = tally.write_results(&mut output);

    assert!(matches!(result, Err(TallyError::NoSales)));
    assert!(output.is_empty());
}
