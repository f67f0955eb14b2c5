use serde_json::Value;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::commands::Listing;
use crate::storage::DbStats;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

pub fn stats_table(stats: &DbStats) -> String {
    let rows: Vec<StatsRow> = stats
        .rows()
        .into_iter()
        .map(|(table, rows)| StatsRow { table, rows })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One row per record, one column per table column
pub fn listing_table(listing: &Listing) -> String {
    let mut builder = Builder::default();
    builder.push_record(listing.columns.iter().map(|c| c.to_string()));
    for row in &listing.rows {
        builder.push_record(listing.columns.iter().map(|c| cell(row.get(*c))));
    }
    builder.build().with(Style::rounded()).to_string()
}
