use crate::models::{Point, Series};
use anyhow::{Context, Result, anyhow, bail};
use csv::ReaderBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A numeric CSV table as written by the benchmark program: one header row,
/// then one row per problem size. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<f64>>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                anyhow!(
                    "column `{}` not found (available: {})",
                    name,
                    self.headers.join(", ")
                )
            })
    }

    /// Pair two columns into a series, dropping rows where either cell is missing.
    pub fn series(&self, size_column: &str, metric_column: &str) -> Result<Series> {
        let xi = self.column_index(size_column)?;
        let yi = self.column_index(metric_column)?;
        let points = self
            .rows
            .iter()
            .filter_map(|row| match (row.get(xi)?, row.get(yi)?) {
                (Some(x), Some(y)) => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect();
        Ok(Series::new(metric_column, points))
    }

    /// Keep only rows whose size is at most `max_size`. Rows without a size are dropped.
    pub fn filter_max_size(&self, size_column: &str, max_size: f64) -> Result<Table> {
        let xi = self.column_index(size_column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| matches!(row.get(xi), Some(Some(x)) if *x <= max_size))
            .cloned()
            .collect();
        Ok(Table::new(self.headers.clone(), rows))
    }
}

fn parse_cell(raw: &str) -> Option<std::result::Result<f64, std::num::ParseFloatError>> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(s.parse::<f64>())
    }
}

/// Load a headered numeric CSV.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // Files written on Windows often start with a byte-order mark.
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();
    if headers.is_empty() {
        bail!("{} has no header row", path.display());
    }

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        let mut row = Vec::with_capacity(headers.len());
        for (col, header) in headers.iter().enumerate() {
            let cell = match record.get(col).and_then(parse_cell) {
                None => None,
                Some(Ok(v)) => Some(v),
                Some(Err(e)) => bail!(
                    "{}: row {} column `{}`: {:?} is not a number ({})",
                    path.display(),
                    line + 1,
                    header,
                    record.get(col).unwrap_or_default(),
                    e
                ),
            };
            row.push(cell);
        }
        rows.push(row);
    }
    Ok(Table::new(headers, rows))
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_cells_are_dropped_per_column() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("t.csv");
        std::fs::write(&p, "\u{feff}n,a,b\n1,0.5,\n2,nan,0.7\n3,0.9,1.1\n").unwrap();
        let t = load_table(&p).unwrap();
        assert_eq!(t.headers()[0], "n");
        assert_eq!(t.series("n", "a").unwrap().len(), 2);
        assert_eq!(t.series("n", "b").unwrap().len(), 2);
    }
}
