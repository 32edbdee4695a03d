use std::path::Path;
use crate::error::{Result, WhittakerError};

/// Reads a column of f64 values from a CSV file by column name, skipping invalid/missing values.
///
/// Returns an `InvalidInput` error when the header row has no such column.
pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>> {
    let mut rdr = csv::Reader::from_path(path)?;

    let headers = rdr.headers()?.clone();
    let col_index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| WhittakerError::InvalidInput(format!("no column named '{}'", column)))?;

    collect_column(&mut rdr, col_index)
}

/// Reads a column of f64 values from a CSV file by column index, skipping invalid/missing values.
pub fn read_csv_column_by_index<P: AsRef<Path>>(path: P, col_index: usize) -> Result<Vec<f64>> {
    let mut rdr = csv::Reader::from_path(path)?;
    collect_column(&mut rdr, col_index)
}

fn collect_column<R: std::io::Read>(rdr: &mut csv::Reader<R>, col_index: usize) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(Ok(val)) = record.get(col_index).map(|field| field.trim().parse::<f64>()) {
            values.push(val);
        }
    }
    log::debug!("read {} values from column {}", values.len(), col_index);
    Ok(values)
}

/// Copies `input` to `output` with an extra column `name` holding `values`.
///
/// Record `i` receives `values[i]`; records past the end of `values` get an
/// empty field. `input` and `output` may be the same file.
pub fn append_csv_column<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    name: &str,
    values: &[f64],
) -> Result<()> {
    // Read everything first so the output may overwrite the input
    let mut rdr = csv::Reader::from_path(input)?;
    let mut headers = rdr.headers()?.clone();
    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

    headers.push_field(name);

    let mut wtr = csv::Writer::from_path(output)?;
    wtr.write_record(&headers)?;
    for (i, mut record) in records.into_iter().enumerate() {
        let value = values.get(i).map(|v| v.to_string()).unwrap_or_default();
        record.push_field(&value);
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    Ok(())
}
