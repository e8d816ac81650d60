use crate::MEMORY_SIZE;

pub mod audio;
pub mod flags;
pub mod input;
pub mod map;
pub mod video;

use map::{GAMENAME_ADDR, GAMENAME_SIZE};

/// The console's 64 KiB linear memory.
///
/// Every register the guest can see lives at a fixed offset in this buffer
/// (see [`map`]). Reads and writes are total over `u16`: the address type is
/// exactly as wide as the memory, so there is no out-of-bounds case.
pub struct AddressSpace {
    cells: Box<[u8; MEMORY_SIZE]>,
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSpace {
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; MEMORY_SIZE]),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// Up to `len` bytes starting at `start`, cut short at the end of memory.
    pub fn slice(&self, start: u16, len: usize) -> &[u8] {
        let start = start as usize;
        let end = start.saturating_add(len).min(MEMORY_SIZE);
        &self.cells[start..end]
    }

    pub fn slice_mut(&mut self, start: u16, len: usize) -> &mut [u8] {
        let start = start as usize;
        let end = start.saturating_add(len).min(MEMORY_SIZE);
        &mut self.cells[start..end]
    }

    /// Copies `bytes` into memory at `start`; anything past 0xFFFF is dropped.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let dst = self.slice_mut(start, bytes.len());
        let len = dst.len();
        dst.copy_from_slice(&bytes[..len]);
    }

    pub fn fill(&mut self, start: u16, len: usize, value: u8) {
        self.slice_mut(start, len).fill(value);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells[..]
    }

    /// The identifying string the guest wrote into the GameName region.
    ///
    /// Stops at the first NUL; invalid UTF-8 is replaced rather than
    /// rejected since the guest owns these bytes.
    pub fn game_name(&self) -> String {
        let raw = self.slice(GAMENAME_ADDR, GAMENAME_SIZE);
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_every_address() {
        let mut mem = AddressSpace::new();
        for addr in 0..=u16::MAX {
            let value = (addr as u8) ^ (addr >> 8) as u8 ^ 0x5A;
            mem.write(addr, value);
            assert_eq!(mem.read(addr), value, "addr 0x{addr:04X}");
        }
    }

    #[test]
    fn every_value_round_trips_at_region_edges() {
        let mut mem = AddressSpace::new();
        for addr in [0x0000, 0x0040, 0x00FF, 0xE8FF, 0xE900, 0xFF7F, 0xFF94, 0xFFFF] {
            for value in 0..=u8::MAX {
                mem.write(addr, value);
                assert_eq!(mem.read(addr), value, "addr 0x{addr:04X}");
            }
        }
    }

    #[test]
    fn write_touches_exactly_one_cell() {
        let mut mem = AddressSpace::new();
        mem.write(0x1234, 0xAB);
        let touched = mem.as_bytes().iter().filter(|&&b| b != 0).count();
        assert_eq!(touched, 1);
        assert_eq!(mem.read(0x1233), 0);
        assert_eq!(mem.read(0x1235), 0);
    }

    #[test]
    fn starts_zeroed() {
        let mem = AddressSpace::new();
        assert_eq!(mem.as_bytes().len(), MEMORY_SIZE);
        assert!(mem.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn load_clamps_at_end_of_memory() {
        let mut mem = AddressSpace::new();
        mem.load(0xFFFE, &[1, 2, 3, 4]);
        assert_eq!(mem.read(0xFFFE), 1);
        assert_eq!(mem.read(0xFFFF), 2);
        // Nothing wrapped around to the bottom of memory.
        assert_eq!(mem.read(0x0000), 0);
        assert_eq!(mem.slice(0xFFFF, 16), &[2]);
    }

    #[test]
    fn game_name_stops_at_nul() {
        let mut mem = AddressSpace::new();
        mem.load(GAMENAME_ADDR, b"PONG\0junk");
        assert_eq!(mem.game_name(), "PONG");

        mem.fill(GAMENAME_ADDR, GAMENAME_SIZE, b'A');
        assert_eq!(mem.game_name().len(), GAMENAME_SIZE);
    }
}
