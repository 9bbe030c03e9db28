//! Headerless CSV readers for the three input layouts.

use std::path::Path;

use hpdiv_core::{ClusterId, LabelVector, PointSet};
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

struct Row {
    leading: Vec<u64>,
    coordinates: Vec<f32>,
}

/// Reads one point per row.
///
/// # Errors
/// Returns [`CliError`] when the file cannot be read, a field is not a
/// number, or the rows do not form a valid point set.
pub fn read_points(path: &Path) -> Result<PointSet, CliError> {
    let rows = read_rows(path, 0)?;
    Ok(PointSet::try_from_rows(
        rows.into_iter().map(|row| row.coordinates).collect(),
    )?)
}

/// Reads `label,x1,..,xD` rows.
///
/// # Errors
/// As [`read_points`], and when a label is not a non-negative integer.
pub fn read_labelled(path: &Path) -> Result<(PointSet, LabelVector), CliError> {
    let rows = read_rows(path, 1)?;
    let mut labels = Vec::with_capacity(rows.len());
    let mut coordinates = Vec::with_capacity(rows.len());
    for row in rows {
        labels.push(to_label(path, &row)?);
        coordinates.push(row.coordinates);
    }
    Ok((PointSet::try_from_rows(coordinates)?, LabelVector::new(labels)))
}

/// Reads `cluster,label,x1,..,xD` rows.
///
/// # Errors
/// As [`read_labelled`], and when a cluster id is not a non-negative
/// integer.
pub fn read_clustered(path: &Path) -> Result<(PointSet, LabelVector, Vec<ClusterId>), CliError> {
    let rows = read_rows(path, 2)?;
    let mut membership = Vec::with_capacity(rows.len());
    let mut labels = Vec::with_capacity(rows.len());
    let mut coordinates = Vec::with_capacity(rows.len());
    for row in rows {
        membership.push(ClusterId::new(row.leading[0]));
        labels.push(to_label(path, &row)?);
        coordinates.push(row.coordinates);
    }
    Ok((
        PointSet::try_from_rows(coordinates)?,
        LabelVector::new(labels),
        membership,
    ))
}

fn to_label(path: &Path, row: &Row) -> Result<usize, CliError> {
    let raw = row.leading[row.leading.len() - 1];
    usize::try_from(raw).map_err(|_| CliError::LabelTooLarge {
        path: path.to_path_buf(),
        label: raw,
    })
}

#[instrument(
    name = "cli.read_csv",
    err,
    skip(path),
    fields(path = field::Empty, rows = field::Empty),
)]
fn read_rows(path: &Path, leading: usize) -> Result<Vec<Row>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|source| CliError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| CliError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() <= leading {
            return Err(CliError::MissingColumns {
                path: path.to_path_buf(),
                line,
                expected: leading + 1,
                found: record.len(),
            });
        }

        let mut fields = record.iter().enumerate();
        let leading_values = fields
            .by_ref()
            .take(leading)
            .map(|(column, value)| parse_field(path, line, column, value))
            .collect::<Result<Vec<u64>, _>>()?;
        let coordinates = fields
            .map(|(column, value)| parse_field(path, line, column, value))
            .collect::<Result<Vec<f32>, _>>()?;
        rows.push(Row {
            leading: leading_values,
            coordinates,
        });
    }

    span.record("rows", rows.len());
    debug!(rows = rows.len(), leading, "csv input read");
    Ok(rows)
}

fn parse_field<T: std::str::FromStr>(
    path: &Path,
    line: u64,
    column: usize,
    value: &str,
) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidField {
        path: path.to_path_buf(),
        line,
        column: column + 1,
        value: value.to_owned(),
    })
}
