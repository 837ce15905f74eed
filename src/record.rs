use rust_decimal::Decimal;
use serde::Deserialize;

// Blank cells deserialize to None, the way the export leaves gaps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    pub zip_code: Option<String>,
    pub item_description: Option<String>,
    pub bottles_sold: Option<u64>,
    pub store_number: Option<u32>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub sale_dollars: Option<Decimal>,
}

impl SalesRecord {
    pub fn new(
        zip_code: &str,
        item_description: &str,
        bottles_sold: u64,
        store_number: u32,
        sale_dollars: Decimal,
    ) -> Self {
        SalesRecord {
            zip_code: Some(zip_code.to_string()),
            item_description: Some(item_description.to_string()),
            bottles_sold: Some(bottles_sold),
            store_number: Some(store_number),
            sale_dollars: Some(sale_dollars),
        }
    }

    pub(crate) fn zip_and_item(&self) -> Option<(&str, &str)> {
        match (&self.zip_code, &self.item_description) {
            (Some(zip), Some(item)) => Some((zip.as_str(), item.as_str())),
            _ => None,
        }
    }
}
