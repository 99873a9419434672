use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::page::PageStore;
use crate::row::Row;
use crate::TABLE_MAX_ROWS;

/// An append-only table of [`Row`]s.
///
/// Every page is allocated when the table is created. Rows are appended in
/// order and stay where they were written until the table is dropped.
#[derive(Default)]
pub struct Table {
    pages: PageStore,
    row_count: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn is_full(&self) -> bool {
        self.row_count == TABLE_MAX_ROWS
    }

    /// Appends `row` after the last one. Ids are stored as given, duplicates included.
    ///
    /// Nothing is written unless the row fits.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            warn!(id = row.id, "table full, rejecting insert");
            return Err(Error::TableFull);
        }
        if let Err(e) = row.validate() {
            warn!(id = row.id, error = %e, "oversize field, rejecting insert");
            return Err(e);
        }

        row.serialize(self.pages.slot_mut(self.row_count)?);
        debug!(row_index = self.row_count, id = row.id, "inserted row");
        self.row_count += 1;

        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Row> {
        if index >= self.row_count {
            return None;
        }
        let slot = self.pages.slot(index);
        debug_assert!(slot.is_ok(), "row {index} is below row_count but has no slot");
        slot.ok().map(Row::deserialize)
    }

    /// Every row in insertion order, paired with its index.
    pub fn scan(&self) -> Scan<'_> {
        Scan {
            table: self,
            next: 0,
        }
    }
}

/// Iterator returned by [`Table::scan`]. Rows are decoded one at a time.
pub struct Scan<'a> {
    table: &'a Table,
    next: usize,
}

impl Iterator for Scan<'_> {
    type Item = (usize, Row);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let row = self.table.get(index)?;
        self.next += 1;
        Some((index, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.row_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Scan<'_> {}

impl FusedIterator for Scan<'_> {}
