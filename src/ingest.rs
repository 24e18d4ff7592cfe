//! CSV ingestion.
//!
//! Reads a delimited text table into a [`Dataset`]. The expected layout is the
//! classic labelled-sample file: a header row of attribute names, one instance
//! per line, and a trailing class column that is not part of the feature
//! vector and is dropped by default.

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How [`read_csv`] interprets its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first line holds attribute names.
    pub has_header: bool,
    /// Whether the last column (the class label) is skipped.
    pub drop_last_column: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            drop_last_column: true,
        }
    }
}

/// Parse a CSV table from `reader`.
///
/// Every kept field must parse as a finite `f64` after trimming; otherwise the
/// call fails with [`Error::Parse`], so `nan` and `inf` are rejected too. Lines
/// whose field count differs from the header (or from the first line, without a
/// header) fail with [`Error::DimensionMismatch`].
pub fn read_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let drop = usize::from(options.drop_last_column);

    let mut names = None;
    let mut width = None;
    if options.has_header {
        let header = rdr.headers()?;
        width = Some(header.len());
        names = Some(
            header
                .iter()
                .take(header.len().saturating_sub(drop))
                .map(str::to_owned)
                .collect::<Vec<_>>(),
        );
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: record.len(),
            });
        }
        let row = parse_record(&record, expected.saturating_sub(drop))?;
        log::trace!("instance {:>6}: {:?}", rows.len(), row);
        rows.push(row);
    }

    let data = Dataset::new(rows)?;
    log::debug!(
        "read {} instances with {} attributes",
        data.len(),
        data.dim()
    );
    match names {
        Some(names) => data.with_attribute_names(names),
        None => Ok(data),
    }
}

/// Open `path` and parse it with [`read_csv`].
pub fn read_csv_path(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Dataset> {
    let path = path.as_ref();
    log::info!("reading {}", path.display());
    read_csv(File::open(path)?, options)
}

fn parse_record(record: &StringRecord, keep: usize) -> Result<Vec<f64>> {
    let line = record.position().map_or(0, |p| p.line());
    record
        .iter()
        .take(keep)
        .enumerate()
        .map(|(field, value)| {
            value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::Parse {
                    line,
                    field,
                    value: value.to_owned(),
                })
        })
        .collect()
}
