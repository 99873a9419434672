pub mod command;
pub mod error;
pub mod page;
pub mod row;
pub mod table;

pub use command::{MetaCommand, Output, Statement};
pub use error::{Error, Result};
pub use page::{PageStore, SlotAddress};
pub use row::Row;
pub use table::{Scan, Table};

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;

/// Declares each layout constant and lists it in [`LAYOUT`], in declaration order.
macro_rules! layout {
    ($($name:ident = $value:expr;)*) => {
        $(pub const $name: usize = $value;)*

        /// Every layout constant by name, as `.constants` prints them.
        pub const LAYOUT: &[(&str, usize)] = &[$((stringify!($name), $name)),*];
    };
}

layout! {
    ID_SIZE = size_of::<u32>();
    USERNAME_SIZE = COLUMN_USERNAME_SIZE;
    EMAIL_SIZE = COLUMN_EMAIL_SIZE;
    ID_OFFSET = 0;
    USERNAME_OFFSET = ID_OFFSET + ID_SIZE;
    EMAIL_OFFSET = USERNAME_OFFSET + USERNAME_SIZE;
    ROW_SIZE = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;
    PAGE_SIZE = 4096;
    ROWS_PER_PAGE = PAGE_SIZE / ROW_SIZE;
    TABLE_MAX_PAGES = 100;
    TABLE_MAX_ROWS = ROWS_PER_PAGE * TABLE_MAX_PAGES;
}

const _: () = assert!(ROWS_PER_PAGE > 0, "a page must hold at least one row");
const _: () = assert!(EMAIL_OFFSET + EMAIL_SIZE == ROW_SIZE);
