//! Fixed-width binary layout for a single row.
//!
//! A row always occupies exactly [`ROW_SIZE`] bytes:
//!
//! | offset            | width            | field                    |
//! |-------------------|------------------|--------------------------|
//! | `ID_OFFSET`       | `ID_SIZE`        | `id`, little-endian u32  |
//! | `USERNAME_OFFSET` | `USERNAME_SIZE`  | `username`, NUL padded   |
//! | `EMAIL_OFFSET`    | `EMAIL_SIZE`     | `email`, NUL padded      |
//!
//! Text that does not fill its column is padded with `0x00`, and the padding is
//! trimmed again on the way out, so a decoded row compares equal to the one that
//! was encoded.

use std::fmt;

use crate::error::{Error, Result};
use crate::{EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Builds a row, rejecting text that would not fit its column.
    ///
    /// Widths are measured in bytes, so a 32 character username made of
    /// multi-byte characters is too long.
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let row = Self {
            id,
            username: username.into(),
            email: email.into(),
        };
        row.validate()?;
        Ok(row)
    }

    /// Checks that both text fields fit their columns.
    ///
    /// The fields are public, so a row can skip [`Row::new`]; anything that is
    /// about to be serialized should pass through here first.
    pub fn validate(&self) -> Result<()> {
        check_width("username", &self.username, USERNAME_SIZE)?;
        check_width("email", &self.email, EMAIL_SIZE)
    }

    /// Writes the row into `dst`, overwriting the whole slot including padding.
    ///
    /// # Panics
    ///
    /// If `dst` is shorter than [`ROW_SIZE`], or if a text field is wider than
    /// its column. Rows that pass [`Row::validate`] never are.
    pub fn serialize(&self, dst: &mut [u8]) {
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_padded(
            &mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_padded(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Reads a row back out of a slot written by [`Row::serialize`].
    ///
    /// # Panics
    ///
    /// If `src` is shorter than [`ROW_SIZE`].
    pub fn deserialize(src: &[u8]) -> Self {
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Self {
            id: u32::from_le_bytes(id),
            username: read_padded(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_padded(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }

    pub fn encode(&self) -> [u8; ROW_SIZE] {
        let mut buf = [0u8; ROW_SIZE];
        self.serialize(&mut buf);
        buf
    }

    pub fn decode(buf: &[u8; ROW_SIZE]) -> Self {
        Self::deserialize(buf)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_width(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::OversizeField {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

fn write_padded(dst: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    dst[..bytes.len()].copy_from_slice(bytes);
    dst[bytes.len()..].fill(0);
}

fn read_padded(src: &[u8]) -> String {
    let end = src.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&src[..end]).into_owned()
}
