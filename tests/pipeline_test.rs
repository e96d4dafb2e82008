use anyhow::Result;
use rusqlite::Connection;
use std::fs;
use tempfile::tempdir;

use etl_employees::config::Config;
use etl_employees::stages::{load, source_check, transform};

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        raw_path: dir.join("raw/employees.csv"),
        processed_path: dir.join("processed/employees_cleaned.csv"),
        store_path: dir.join("sqlite/employees.db"),
        table_name: "employees".to_string(),
    }
}

#[test]
fn full_pipeline_loads_only_clean_high_salary_rows() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path());

    // 6 raw rows: 3 survive (parseable salary >= 60000)
    fs::create_dir_all(config.raw_path.parent().unwrap())?;
    fs::write(
        &config.raw_path,
        "id,name,department,salary\n\
         1,ada,eng,85000\n\
         2,grace,eng,59999.99\n\
         3,edsger,sales,abc\n\
         4,barbara,hr,60000\n\
         5,donald,eng,\n\
         6,frances,ops,70500.5\n",
    )?;

    source_check(&config)?;

    let summary = transform(&config)?;
    assert_eq!(summary.rows_read, 6);
    assert_eq!(summary.dropped_invalid_salary, 2);
    assert_eq!(summary.dropped_below_threshold, 1);
    assert_eq!(summary.rows_written, 3);

    let loaded = load(&config)?;
    assert_eq!(loaded.rows_loaded, 3);

    let conn = Connection::open(&config.store_path)?;
    let mut stmt =
        conn.prepare("SELECT name, department, salary, bonus FROM employees")?;
    let rows: Vec<(String, String, f64, f64)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<rusqlite::Result<_>>()?;

    assert_eq!(
        rows,
        vec![
            ("ada".to_string(), "ENG".to_string(), 85000.0, 8500.0),
            ("barbara".to_string(), "HR".to_string(), 60000.0, 6000.0),
            ("frances".to_string(), "OPS".to_string(), 70500.5, 7050.05),
        ]
    );
    Ok(())
}

#[test]
fn pipeline_rerun_is_idempotent() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path());

    fs::create_dir_all(config.raw_path.parent().unwrap())?;
    fs::write(
        &config.raw_path,
        "id,department,salary\n1,eng,64000\n2,hr,50000\n",
    )?;

    transform(&config)?;
    let first_processed = fs::read(&config.processed_path)?;
    load(&config)?;

    transform(&config)?;
    let second_processed = fs::read(&config.processed_path)?;
    load(&config)?;

    assert_eq!(first_processed, second_processed);

    let conn = Connection::open(&config.store_path)?;
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    assert_eq!(count, 1);
    Ok(())
}

#[test]
fn missing_raw_file_fails_source_check_before_transform() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path());

    assert!(source_check(&config).is_err());
    Ok(())
}
