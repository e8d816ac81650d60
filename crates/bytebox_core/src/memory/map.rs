//! Fixed memory map shared by host and guest.
//!
//! Addresses and sizes here are part of the guest ABI: a cartridge built
//! against them must see the same bytes at the same offsets on every host.

use crate::error::MapError;
use crate::{FRAMEBUFFER_SIZE, MEMORY_SIZE};

pub const RESERVED_ADDR: u16 = 0x0000;
pub const RESERVED_SIZE: usize = 0x40;
/// System flags, 1 byte.
pub const SYSFLAGS_ADDR: u16 = 0x0040;
/// Random seed written by the host at load; only the first byte is set.
pub const SEED_ADDR: u16 = 0x0041;
pub const SEED_SIZE: usize = 3;
pub const GAMENAME_ADDR: u16 = 0x0044;
pub const GAMENAME_SIZE: usize = 24;
pub const RAM_ADDR: u16 = 0x0100;
pub const RAM_SIZE: usize = 0xE000;
/// Work RAM the host persists across sessions on request.
pub const WRAM_ADDR: u16 = 0xE100;
pub const WRAM_SIZE: usize = 1024;
pub const VIDEO_ADDR: u16 = 0xE900;
pub const VIDEO_SIZE: usize = FRAMEBUFFER_SIZE;
/// Four RGB palette entries, 3 bytes each.
pub const PALETTE_ADDR: u16 = 0xFF84;
pub const PALETTE_SIZE: usize = 12;
pub const COLOR1_ADDR: u16 = 0xFF84;
pub const COLOR2_ADDR: u16 = 0xFF87;
pub const COLOR3_ADDR: u16 = 0xFF8A;
pub const COLOR4_ADDR: u16 = 0xFF8D;
pub const GAMEPAD1_ADDR: u16 = 0xFF94;
pub const GAMEPAD2_ADDR: u16 = 0xFF95;
/// Bit `n` set while channel `n` is playing. Written by the audio backend.
pub const SOUND_STATUS_ADDR: u16 = 0xFF97;
pub const SFX_ADDR: u16 = 0xFF98;
pub const SFX_CH1_ADDR: u16 = 0xFF98;
pub const SFX_CH2_ADDR: u16 = 0xFF9C;
pub const SFX_CH3_ADDR: u16 = 0xFFA0;
pub const SFX_CH4_ADDR: u16 = 0xFFA4;
pub const SFX_SIZE: usize = 16;

/// What the guest may do with a region through `poke`.
///
/// Reads are always allowed. The host itself is never restricted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Access {
    ReadWrite,
    /// Only the host writes here; guest pokes are dropped.
    ReadOnly,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegionKind {
    Reserved,
    SysFlags,
    Seed,
    GameName,
    Ram,
    Wram,
    Video,
    Palette,
    Gamepads,
    SoundStatus,
    Sfx,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub start: u16,
    pub len: usize,
    pub guest_access: Access,
}

impl Region {
    pub const fn new(kind: RegionKind, start: u16, len: usize, guest_access: Access) -> Self {
        Self {
            kind,
            start,
            len,
            guest_access,
        }
    }

    /// One past the last address, as `usize` so that a region ending at
    /// 0xFFFF can be represented.
    #[inline]
    pub fn end(&self) -> usize {
        self.start as usize + self.len
    }

    #[inline]
    pub fn contains(&self, addr: u16) -> bool {
        (self.start as usize..self.end()).contains(&(addr as usize))
    }
}

pub const DEFAULT_REGIONS: [Region; 11] = [
    Region::new(RegionKind::Reserved, RESERVED_ADDR, RESERVED_SIZE, Access::ReadWrite),
    Region::new(RegionKind::SysFlags, SYSFLAGS_ADDR, 1, Access::ReadWrite),
    Region::new(RegionKind::Seed, SEED_ADDR, SEED_SIZE, Access::ReadWrite),
    Region::new(RegionKind::GameName, GAMENAME_ADDR, GAMENAME_SIZE, Access::ReadWrite),
    Region::new(RegionKind::Ram, RAM_ADDR, RAM_SIZE, Access::ReadWrite),
    Region::new(RegionKind::Wram, WRAM_ADDR, WRAM_SIZE, Access::ReadWrite),
    Region::new(RegionKind::Video, VIDEO_ADDR, VIDEO_SIZE, Access::ReadWrite),
    Region::new(RegionKind::Palette, PALETTE_ADDR, PALETTE_SIZE, Access::ReadWrite),
    Region::new(RegionKind::Gamepads, GAMEPAD1_ADDR, 2, Access::ReadOnly),
    Region::new(RegionKind::SoundStatus, SOUND_STATUS_ADDR, 1, Access::ReadOnly),
    Region::new(RegionKind::Sfx, SFX_ADDR, SFX_SIZE, Access::ReadWrite),
];

/// A validated set of non-overlapping regions, sorted by start address.
///
/// Addresses that fall outside every region are plain user memory.
#[derive(Clone, Debug)]
pub struct MemoryMap {
    regions: Vec<Region>,
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.to_vec(),
        }
    }
}

impl MemoryMap {
    /// Checks a region table before any guest code runs against it, so that
    /// a bad layout is a load-time failure instead of a surprise on `poke`.
    pub fn new(mut regions: Vec<Region>) -> Result<Self, MapError> {
        regions.sort_by_key(|r| r.start);

        for region in &regions {
            if region.len == 0 {
                return Err(MapError::Empty { kind: region.kind });
            }
            if region.end() > MEMORY_SIZE {
                return Err(MapError::OutOfRange {
                    kind: region.kind,
                    start: region.start,
                    len: region.len,
                });
            }
        }

        for pair in regions.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if first.end() > second.start as usize {
                return Err(MapError::Overlap {
                    first: first.kind,
                    second: second.kind,
                    at: second.start,
                });
            }
        }

        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_at(&self, addr: u16) -> Option<&Region> {
        // Regions are sorted, so the candidate is the last one starting at
        // or before `addr`.
        let idx = self.regions.partition_point(|r| r.start <= addr);
        let candidate = self.regions.get(idx.checked_sub(1)?)?;
        candidate.contains(addr).then_some(candidate)
    }

    pub fn guest_access(&self, addr: u16) -> Access {
        self.region_at(addr)
            .map_or(Access::ReadWrite, |r| r.guest_access)
    }
}
