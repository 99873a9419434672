use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading a line and touching the table.
///
/// None of these are fatal: the REPL reports them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Insert attempted with every slot already taken.
    #[error("Error: Table full.")]
    TableFull,

    /// A row index past the last slot of the last page.
    #[error("row index {row_index} is out of capacity ({capacity} rows)")]
    OutOfCapacity { row_index: usize, capacity: usize },

    /// Wrong number of arguments, or an id that isn't a number.
    #[error("Syntax error. Could not parse statement: {input}")]
    MalformedCommand { input: String },

    #[error("ID must be positive.")]
    NegativeId,

    /// A text column longer than its fixed width, in bytes.
    #[error("String is too long.")]
    OversizeField {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Unrecognized command: {input}")]
    UnrecognizedStatement { input: String },
}
