use thiserror::Error;

/// Reasons a scraped table cannot be rendered as a document table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Empty table")]
    Empty,
    #[error("Invalid table: {expected} cells in first row, {found} cells in row #{row}")]
    Ragged {
        expected: usize,
        found: usize,
        /// 1-based row number, matching how a reader counts rows.
        row: usize,
    },
}

/// One table row: cell texts in left-to-right order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A scraped table. Rows are kept exactly as found on the page; shape is only
/// enforced when the table is about to be written (see [`Table::dimensions`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a table from nested string slices.
    #[cfg(test)]
    pub fn from_cells<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(|r| r.into_iter().collect()).collect(),
        }
    }

    /// Returns `(rows, columns)` if every row has as many cells as the first one.
    /// A table whose rows carry no cells at all counts as empty.
    pub fn dimensions(&self) -> Result<(usize, usize), TableError> {
        let first = self.rows.first().ok_or(TableError::Empty)?;
        let columns = first.len();

        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != columns {
                return Err(TableError::Ragged {
                    expected: columns,
                    found: row.len(),
                    row: idx + 1,
                });
            }
        }

        if columns == 0 {
            return Err(TableError::Empty);
        }

        Ok((self.rows.len(), columns))
    }
}
