use std::fs;

use rusqlite::types::Value;
use rusqlite::Connection;
use tracing::info;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;

/// Per-run counts from the load stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_loaded: usize,
    pub table: String,
}

/// SQL type inferred for a column of the processed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Real,
    Text,
}

impl ColumnType {
    fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

/// A column is REAL when every value in it parses as a number, TEXT
/// otherwise. Empty datasets get TEXT columns.
fn infer_column_types(dataset: &Dataset) -> Vec<ColumnType> {
    (0..dataset.headers.len())
        .map(|idx| {
            let all_numeric = !dataset.rows.is_empty()
                && dataset
                    .rows
                    .iter()
                    .all(|row| row[idx].trim().parse::<f64>().is_ok());
            if all_numeric {
                ColumnType::Real
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reads the processed dataset and replaces the destination table with it.
///
/// The drop + create + bulk insert run inside a single transaction, so a
/// failed run leaves the previous table contents untouched rather than a
/// half-written table.
pub fn load(config: &Config) -> Result<LoadSummary> {
    let dataset = Dataset::read_csv(&config.processed_path)?;

    if let Some(parent) = config.store_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut conn = Connection::open(&config.store_path)?;

    let column_types = infer_column_types(&dataset);
    let table = quote_ident(&config.table_name);
    let column_defs: Vec<String> = dataset
        .headers
        .iter()
        .zip(&column_types)
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.sql_name()))
        .collect();
    let placeholders: Vec<&str> = dataset.headers.iter().map(|_| "?").collect();

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
    tx.execute(
        &format!("CREATE TABLE {table} ({})", column_defs.join(", ")),
        [],
    )?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} VALUES ({})",
            placeholders.join(", ")
        ))?;
        for row in &dataset.rows {
            let values: Vec<Value> = row
                .iter()
                .zip(&column_types)
                .map(|(field, ty)| match ty {
                    // Inference guaranteed the parse; fall back to text if a
                    // value still refuses.
                    ColumnType::Real => field
                        .trim()
                        .parse::<f64>()
                        .map(Value::Real)
                        .unwrap_or_else(|_| Value::Text(field.clone())),
                    ColumnType::Text => Value::Text(field.clone()),
                })
                .collect();
            stmt.execute(rusqlite::params_from_iter(values))?;
        }
    }
    tx.commit()?;

    let summary = LoadSummary {
        rows_loaded: dataset.rows.len(),
        table: config.table_name.clone(),
    };
    info!(
        rows_loaded = summary.rows_loaded,
        table = %summary.table,
        store = %config.store_path.display(),
        "load complete"
    );
    Ok(summary)
}
