//! Delimited text file data source

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DataSource, VectorSource};
use crate::error::DataError;

/// Column selector: header name or zero-based position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Name(String),
    Index(usize),
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<usize> for Column {
    fn from(index: usize) -> Self {
        Column::Index(index)
    }
}

/// Two numeric columns of a comma, tab or whitespace separated file.
///
/// Lines starting with `#` and blank lines are skipped. The first remaining
/// line is treated as a header when any of its fields fails to parse as a
/// number. The source stays unpopulated until [`TableSource::load`] succeeds.
#[derive(Debug, Clone)]
pub struct TableSource {
    path: PathBuf,
    independent: Column,
    dependent: Column,
    pending_bounds: (Option<f64>, Option<f64>),
    loaded: Option<VectorSource>,
}

impl TableSource {
    pub fn new(
        path: impl Into<PathBuf>,
        independent: impl Into<Column>,
        dependent: impl Into<Column>,
    ) -> Self {
        Self {
            path: path.into(),
            independent: independent.into(),
            dependent: dependent.into(),
            pending_bounds: (None, None),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and validate the selected columns
    pub fn load(&mut self) -> Result<(), DataError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: self.path.clone(),
            source,
        })?;
        let (independent, dependent) = self.parse(&text)?;
        debug!(path = %self.path.display(), rows = independent.len(), "loaded table");

        let (min, max) = self.pending_bounds;
        self.loaded = Some(VectorSource::with_bounds(independent, dependent, min, max)?);
        Ok(())
    }

    /// Build and load in one step
    pub fn open(
        path: impl Into<PathBuf>,
        independent: impl Into<Column>,
        dependent: impl Into<Column>,
    ) -> Result<Self, DataError> {
        let mut source = Self::new(path, independent, dependent);
        source.load()?;
        Ok(source)
    }

    fn parse(&self, text: &str) -> Result<(Vec<f64>, Vec<f64>), DataError> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .peekable();

        let mut header: Option<Vec<String>> = None;
        if let Some((_, first)) = rows.peek()
            && split_fields(first).any(|f| f.parse::<f64>().is_err())
        {
            header = Some(split_fields(first).map(str::to_string).collect());
            rows.next();
        }

        let x_col = self.resolve(&self.independent, header.as_deref())?;
        let y_col = self.resolve(&self.dependent, header.as_deref())?;

        let mut independent = Vec::new();
        let mut dependent = Vec::new();
        for (line_no, line) in rows {
            let fields: Vec<&str> = split_fields(line).collect();
            independent.push(parse_field(&fields, x_col, line_no)?);
            dependent.push(parse_field(&fields, y_col, line_no)?);
        }
        Ok((independent, dependent))
    }

    fn resolve(&self, column: &Column, header: Option<&[String]>) -> Result<usize, DataError> {
        match column {
            Column::Index(index) => Ok(*index),
            Column::Name(name) => header
                .and_then(|h| h.iter().position(|field| field == name))
                .ok_or_else(|| DataError::MissingColumn {
                    path: self.path.clone(),
                    column: name.clone(),
                }),
        }
    }

    fn populated(&self) -> Result<&VectorSource, DataError> {
        self.loaded.as_ref().ok_or(DataError::NotPopulated {
            param: "table source",
        })
    }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c == '\t' || c.is_whitespace())
        .map(str::trim)
        .filter(|f| !f.is_empty())
}

fn parse_field(fields: &[&str], column: usize, line: usize) -> Result<f64, DataError> {
    let text = fields.get(column).copied().unwrap_or("");
    text.parse().map_err(|_| DataError::Parse {
        line,
        column,
        text: text.to_string(),
    })
}

impl DataSource for TableSource {
    fn independent_values(&self) -> Result<&[f64], DataError> {
        self.populated()?.independent_values()
    }

    fn dependent_values(&self) -> Result<&[f64], DataError> {
        self.populated()?.dependent_values()
    }

    fn bounds(&self) -> (Option<f64>, Option<f64>) {
        self.pending_bounds
    }

    fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> Result<(), DataError> {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.set_bounds(min, max)?;
        } else if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(DataError::InvertedBounds { min: lo, max: hi });
        }
        self.pending_bounds = (min, max);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn DataSource> {
        Box::new(self.clone())
    }
}
