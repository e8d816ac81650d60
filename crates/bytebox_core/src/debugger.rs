//! Host-side memory viewer: a 16x16 hex window over the address space that
//! remembers what it showed last time, so bytes written since the previous
//! view can be highlighted.

use std::fmt;

use crate::memory::map::VIDEO_ADDR;
use crate::memory::AddressSpace;

pub const VIEW_COLUMNS: usize = 16;
pub const VIEW_ROWS: usize = 16;
const VIEW_SIZE: usize = VIEW_COLUMNS * VIEW_ROWS;

/// One line of the viewer. Rows near the top of memory may be short.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemoryRow {
    pub addr: u16,
    pub bytes: Vec<u8>,
    /// Bit `n` set if column `n` differs from the previous view.
    pub changed: u16,
}

impl MemoryRow {
    pub fn is_changed(&self, column: usize) -> bool {
        column < VIEW_COLUMNS && self.changed & (1 << column) != 0
    }
}

impl fmt::Display for MemoryRow {
    /// `E900  00 FF*00 ...`: a `*` follows every changed byte.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} ", self.addr)?;
        for (column, byte) in self.bytes.iter().enumerate() {
            let mark = if self.is_changed(column) { '*' } else { ' ' };
            write!(f, " {:02X}{}", byte, mark)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct MemoryViewer {
    base: u16,
    last: [u8; VIEW_SIZE],
}

impl Default for MemoryViewer {
    fn default() -> Self {
        Self::new(VIDEO_ADDR)
    }
}

impl MemoryViewer {
    pub fn new(base: u16) -> Self {
        Self {
            base,
            last: [0; VIEW_SIZE],
        }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    pub fn set_base(&mut self, base: u16) {
        self.base = base;
    }

    /// Accepts an address typed by the operator. Non-hex characters are
    /// ignored; anything other than exactly four hex digits is rejected and
    /// leaves the base unchanged.
    pub fn set_base_hex(&mut self, text: &str) -> Option<u16> {
        let digits: String = text.chars().filter(char::is_ascii_hexdigit).collect();
        if digits.len() != 4 {
            return None;
        }
        let base = u16::from_str_radix(&digits, 16).ok()?;
        self.base = base;
        Some(base)
    }

    /// Snapshots the window at the current base and marks the bytes that
    /// changed since the previous call. The first view compares against
    /// zeroes.
    pub fn view(&mut self, memory: &AddressSpace) -> Vec<MemoryRow> {
        let mut rows = Vec::with_capacity(VIEW_ROWS);
        for row in 0..VIEW_ROWS {
            let start = self.base as usize + row * VIEW_COLUMNS;
            if start > u16::MAX as usize {
                break;
            }

            let bytes = memory.slice(start as u16, VIEW_COLUMNS).to_vec();
            let mut changed = 0u16;
            for (column, &value) in bytes.iter().enumerate() {
                let seen = &mut self.last[row * VIEW_COLUMNS + column];
                if *seen != value {
                    changed |= 1 << column;
                }
                *seen = value;
            }

            rows.push(MemoryRow {
                addr: start as u16,
                bytes,
                changed,
            });
        }
        rows
    }
}
