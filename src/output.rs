//! CSV rendering for list output.

use crate::models::{ConcessionGroup, Product};

/// A record that can be printed as one CSV row.
pub trait CsvRecord {
    /// Header row naming the fields, in row order.
    fn csv_header() -> String;

    /// Field values in header order.
    fn csv_fields(&self) -> Vec<&str>;

    /// The record as one CSV row. Values containing commas are quoted.
    fn csv(&self) -> String {
        self.csv_fields()
            .into_iter()
            .map(csv_value)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn csv_value(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

impl CsvRecord for ConcessionGroup {
    fn csv_header() -> String {
        "id,label,participant_id".to_string()
    }

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.label.as_str(),
            self.participant_id.as_str(),
        ]
    }
}

impl CsvRecord for Product {
    fn csv_header() -> String {
        "id,code,status,type,description,participant_id".to_string()
    }

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.code.as_str(),
            self.status.as_str(),
            self.product_type.as_str(),
            self.description.as_str(),
            self.participant_id.as_str(),
        ]
    }
}
