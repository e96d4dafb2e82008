use tracing::info;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;

/// Minimum salary (inclusive) for a row to survive the threshold filter.
const SALARY_THRESHOLD: f64 = 60_000.0;

/// Bonus is one tenth of salary, rounded to cents.
const BONUS_RATE: f64 = 0.1;

/// Per-run counts from the transform stage. Dropped rows are intentional
/// truncation, not errors; the counts make that observable and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows_read: usize,
    pub dropped_invalid_salary: usize,
    pub dropped_below_threshold: usize,
    pub rows_written: usize,
}

/// Rounds to two decimal places. Ties round away from zero, following
/// `f64::round`: `round2(0.125) == 0.13`.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Coerces a salary field to a number. Whitespace is tolerated; anything that
/// does not parse to a finite value is a coercion failure.
fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads the raw dataset, cleans and enriches it, and overwrites the
/// processed file.
///
/// Row by row, in input order: coerce `salary` to a number (dropping rows
/// that fail), compute `bonus = round2(salary * 0.1)`, keep only rows with
/// `salary >= 60000`, and uppercase `department`. All other columns pass
/// through unchanged. The output is deterministic, so rerunning on the same
/// input produces byte-identical output.
pub fn transform(config: &Config) -> Result<TransformSummary> {
    let raw = Dataset::read_csv(&config.raw_path)?;
    let salary_idx = raw.column_index("salary")?;
    let department_idx = raw.column_index("department")?;

    let mut summary = TransformSummary {
        rows_read: raw.rows.len(),
        dropped_invalid_salary: 0,
        dropped_below_threshold: 0,
        rows_written: 0,
    };

    let mut headers = raw.headers.clone();
    headers.push("bonus".to_string());

    let mut rows = Vec::new();
    for row in &raw.rows {
        let salary = match parse_salary(&row[salary_idx]) {
            Some(v) => v,
            None => {
                summary.dropped_invalid_salary += 1;
                continue;
            }
        };
        if salary < SALARY_THRESHOLD {
            summary.dropped_below_threshold += 1;
            continue;
        }
        let bonus = round2(salary * BONUS_RATE);

        let mut cleaned: Vec<String> = Vec::with_capacity(row.len() + 1);
        for (idx, field) in row.iter().enumerate() {
            if idx == salary_idx {
                cleaned.push(salary.to_string());
            } else if idx == department_idx {
                cleaned.push(field.to_uppercase());
            } else {
                cleaned.push(field.clone());
            }
        }
        cleaned.push(bonus.to_string());
        rows.push(cleaned);
    }
    summary.rows_written = rows.len();

    let cleaned = Dataset { headers, rows };
    cleaned.write_csv(&config.processed_path)?;

    info!(
        rows_read = summary.rows_read,
        dropped_invalid_salary = summary.dropped_invalid_salary,
        dropped_below_threshold = summary.dropped_below_threshold,
        rows_written = summary.rows_written,
        output = %config.processed_path.display(),
        "transform complete"
    );
    Ok(summary)
}
