use crate::error::{Result, TallyError};
use csv::StringRecord;

/// Columns of the sales export that no report looks at.
pub const DROPPED_COLUMNS: [&str; 18] = [
    "invoice_and_item_number",
    "date",
    "address",
    "city",
    "store_location",
    "county_number",
    "county",
    "category",
    "category_name",
    "vendor_number",
    "vendor_name",
    "pack",
    "bottle_volume_ml",
    "state_bottle_cost",
    "state_bottle_retail",
    "volume_sold_liters",
    "volume_sold_gallons",
    "item_number",
];

/// Columns both aggregators read.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "zip_code",
    "item_description",
    "bottles_sold",
    "store_number",
    "sale_dollars",
];

const NUMERIC_COLUMNS: [&str; 3] = ["bottles_sold", "store_number", "sale_dollars"];

/// Every dropped and every required column has to be in the header row.
/// Only numeric cells are trimmed.
#[derive(Debug, Clone)]
pub struct SchemaReducer {
    kept: Vec<usize>,
    trimmed: Vec<bool>,
    headers: StringRecord,
}

impl SchemaReducer {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        if let Some(missing) = DROPPED_COLUMNS
            .iter()
            .chain(REQUIRED_COLUMNS.iter())
            .find(|name| position(**name).is_none())
        {
            return Err(TallyError::MissingColumn(missing.to_string()));
        }

        let kept: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !DROPPED_COLUMNS.contains(name))
            .map(|(idx, _)| idx)
            .collect();
        let trimmed = kept
            .iter()
            .map(|&idx| NUMERIC_COLUMNS.contains(&&headers[idx]))
            .collect();
        let headers = kept.iter().map(|&idx| &headers[idx]).collect();

        Ok(SchemaReducer {
            kept,
            trimmed,
            headers,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Missing trailing cells project to empty strings.
    pub fn project(&self, record: &StringRecord) -> StringRecord {
        self.kept
            .iter()
            .zip(&self.trimmed)
            .map(|(&idx, &trim)| {
                let cell = record.get(idx).unwrap_or("");
                if trim {
                    cell.trim()
                } else {
                    cell
                }
            })
            .collect()
    }
}

#[cfg(test)]
fn full_headers() -> StringRecord {
    let mut names: Vec<&str> = DROPPED_COLUMNS.to_vec();
    names.insert(3, "store_name");
    names.extend(REQUIRED_COLUMNS.iter());
    StringRecord::from(names)
}

#[test]
fn keeps_required_and_unlisted_columns() {
    let reducer = SchemaReducer::from_headers(&full_headers()).unwrap();

    let expected = StringRecord::from(vec![
        "store_name",
        "zip_code",
        "item_description",
        "bottles_sold",
        "store_number",
        "sale_dollars",
    ]);
    assert_eq!(reducer.headers(), &expected);
}

#[test]
fn projects_rows_without_touching_the_source() {
    let headers = full_headers();
    let reducer = SchemaReducer::from_headers(&headers).unwrap();

    let values: Vec<String> = headers.iter().map(|h| format!("{}-value", h)).collect();
    let row = StringRecord::from(values);
    let projected = reducer.project(&row);

    assert_eq!(projected.len(), 6);
    assert_eq!(&projected[0], "store_name-value");
    assert_eq!(&projected[5], "sale_dollars-value");
    assert_eq!(row.len(), headers.len());
}

#[test]
fn missing_dropped_column_is_an_error() {
    let headers: StringRecord = full_headers().iter().filter(|h| *h != "county").collect();

    match SchemaReducer::from_headers(&headers) {
        Err(TallyError::MissingColumn(name)) => assert_eq!(name, "county"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_required_column_is_an_error() {
    let headers: StringRecord = full_headers()
        .iter()
        .filter(|h| *h != "bottles_sold")
        .collect();

    match SchemaReducer::from_headers(&headers) {
        Err(TallyError::MissingColumn(name)) => assert_eq!(name, "bottles_sold"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn trims_numeric_cells_only() {
    let headers = full_headers();
    let reducer = SchemaReducer::from_headers(&headers).unwrap();

    let values: Vec<&str> = headers
        .iter()
        .map(|h| match h {
            "item_description" => "Vodka A ",
            "bottles_sold" => " 12 ",
            "sale_dollars" => " 63.00",
            _ => "x",
        })
        .collect();
    let projected = reducer.project(&StringRecord::from(values));

    assert_eq!(&projected[2], "Vodka A ");
    assert_eq!(&projected[3], "12");
    assert_eq!(&projected[5], "63.00");
}
