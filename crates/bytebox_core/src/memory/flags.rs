use bitflags::bitflags;

use super::map::SYSFLAGS_ADDR;
use super::AddressSpace;

bitflags! {
    /// Run-control bits at `SYSFLAGS_ADDR`.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct SysFlags: u8 {
        /// Stop scheduling `update` at the next frame boundary.
        const HALT = 0x01;
        /// Persist the WRAM region. Cleared by the host once serviced.
        const DUMP_WRAM = 0x02;
    }
}

impl AddressSpace {
    pub fn sys_flags(&self) -> SysFlags {
        SysFlags::from_bits_retain(self.read(SYSFLAGS_ADDR))
    }

    pub fn set_sys_flags(&mut self, flags: SysFlags) {
        self.write(SYSFLAGS_ADDR, flags.bits());
    }

    pub fn request_halt(&mut self) {
        self.set_sys_flags(self.sys_flags() | SysFlags::HALT);
    }

    pub fn is_halted(&self) -> bool {
        self.sys_flags().contains(SysFlags::HALT)
    }

    /// Returns whether a WRAM dump was requested, clearing the request.
    pub fn take_wram_dump(&mut self) -> bool {
        let flags = self.sys_flags();
        if !flags.contains(SysFlags::DUMP_WRAM) {
            return false;
        }
        self.set_sys_flags(flags - SysFlags::DUMP_WRAM);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_sets_bit_zero_only() {
        let mut mem = AddressSpace::new();
        mem.write(SYSFLAGS_ADDR, 0x80);
        assert!(!mem.is_halted());
        mem.request_halt();
        assert!(mem.is_halted());
        assert_eq!(mem.read(SYSFLAGS_ADDR), 0x81);
    }

    #[test]
    fn wram_dump_request_auto_clears() {
        let mut mem = AddressSpace::new();
        assert!(!mem.take_wram_dump());
        mem.write(SYSFLAGS_ADDR, (SysFlags::DUMP_WRAM | SysFlags::HALT).bits());
        assert!(mem.take_wram_dump());
        assert!(!mem.take_wram_dump());
        assert_eq!(mem.sys_flags(), SysFlags::HALT);
    }
}
