use std::path::Path;

use log::debug;

use crate::config::TreeConfig;
use crate::error::{Result, TaromboError};

use super::record::{parse_parent, Record};

/// Read records from a CSV file.
///
/// The first row is a header. The columns named by
/// [`TreeConfig::name_column`] and [`TreeConfig::parent_column`] are located
/// case-insensitively; any other columns are ignored.
///
/// # Errors
/// Returns an error if the file cannot be opened, the CSV is malformed,
/// rows have inconsistent numbers of fields, a required column is missing,
/// or a row has a blank name.
///
/// # Examples
/// ```no_run
/// use tarombo_core::config::TreeConfig;
/// use tarombo_core::data::read_records_csv;
///
/// let records = read_records_csv("Tarombo.csv", &TreeConfig::default()).unwrap();
/// println!("{} records", records.len());
/// ```
pub fn read_records_csv<P: AsRef<Path>>(path: P, config: &TreeConfig) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let records = read_records(file, config)?;
    debug!("Read {} records from '{}'", records.len(), path.display());
    Ok(records)
}

/// Read records from any CSV byte source.
///
/// # Errors
/// See [`read_records_csv`].
pub fn read_records<R: std::io::Read>(source: R, config: &TreeConfig) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let find_column = |wanted: &str| {
        let wanted = wanted.to_lowercase();
        headers.iter().position(|h| *h == wanted).ok_or_else(|| {
            TaromboError::Input(format!("CSV missing '{}' column", wanted))
        })
    };
    let name_col = find_column(&config.name_column)?;
    let parent_col = find_column(&config.parent_column)?;

    let mut records = Vec::new();

    // Row numbers in messages are 1-based and count the header as row 1.
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let row_number = i + 2;

        let name = row.get(name_col).ok_or_else(|| {
            TaromboError::Input(format!("Missing name field in row {}", row_number))
        })?;
        if name.is_empty() {
            return Err(TaromboError::Input(format!("Blank name in row {}", row_number)));
        }

        let parent_raw = row.get(parent_col).ok_or_else(|| {
            TaromboError::Input(format!("Missing parent field in row {}", row_number))
        })?;

        records.push(Record {
            name: name.to_string(),
            parent_name: parse_parent(parent_raw),
        });
    }

    Ok(records)
}
