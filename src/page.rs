//! Pages of row slots.
//!
//! All pages live in one contiguous, zeroed arena that is allocated up front and
//! never grows. Rows are addressed purely by their index: row `i` sits on page
//! `i / ROWS_PER_PAGE` at byte `(i % ROWS_PER_PAGE) * ROW_SIZE`. The tail of each
//! page that is too short for another row is never used.

use tracing::trace;

use crate::error::{Error, Result};
use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

/// Physical location of a row slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAddress {
    pub page_index: usize,
    /// Offset from the start of the page.
    pub byte_offset: usize,
}

impl SlotAddress {
    /// Offset from the start of the whole arena.
    fn arena_offset(self) -> usize {
        self.page_index * PAGE_SIZE + self.byte_offset
    }
}

pub struct PageStore {
    arena: Box<[u8]>,
}

impl PageStore {
    pub fn new() -> Self {
        Self {
            arena: vec![0; TABLE_MAX_PAGES * PAGE_SIZE].into_boxed_slice(),
        }
    }

    pub fn slot_address(&self, row_index: usize) -> Result<SlotAddress> {
        if row_index >= TABLE_MAX_ROWS {
            return Err(Error::OutOfCapacity {
                row_index,
                capacity: TABLE_MAX_ROWS,
            });
        }

        let address = SlotAddress {
            page_index: row_index / ROWS_PER_PAGE,
            byte_offset: (row_index % ROWS_PER_PAGE) * ROW_SIZE,
        };
        trace!(row_index, ?address, "resolved slot");

        Ok(address)
    }

    /// The `ROW_SIZE` bytes reserved for `row_index`.
    pub fn slot(&self, row_index: usize) -> Result<&[u8]> {
        let start = self.slot_address(row_index)?.arena_offset();
        Ok(&self.arena[start..start + ROW_SIZE])
    }

    pub fn slot_mut(&mut self, row_index: usize) -> Result<&mut [u8]> {
        let start = self.slot_address(row_index)?.arena_offset();
        Ok(&mut self.arena[start..start + ROW_SIZE])
    }

    /// A whole page, including its unused tail.
    pub fn page(&self, page_index: usize) -> Option<&[u8]> {
        self.arena.chunks_exact(PAGE_SIZE).nth(page_index)
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}
