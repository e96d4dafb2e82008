use std::fs::{self, File};
use std::path::Path;

use crate::error::{EtlError, Result};

/// A tabular dataset: header row plus data rows, all values kept as strings
/// until a stage coerces them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names, from the header row.
    pub headers: Vec<String>,
    /// Each data row, one string per field.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Reads a CSV file with a header row. Ragged rows are an error.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Writes the dataset as CSV, header first, overwriting any existing file.
    /// Parent directories are created if missing.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Index of a named column, or a `MissingColumn` error.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| EtlError::MissingColumn(name.to_string()))
    }
}
