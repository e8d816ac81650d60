//! The guest/host boundary.
//!
//! A guest module is handed an [`Env`] for the duration of each call. `Env`
//! is the only route into console memory, which is what lets the host
//! enforce per-region access rules without trusting the guest.

use bitflags::bitflags;

use crate::error::Trap;
use crate::memory::map::{Access, MemoryMap};
use crate::memory::AddressSpace;

/// Functions the host provides to guests, by import name.
pub const HOST_IMPORTS: &[&str] = &["peek", "poke", "trace"];

bitflags! {
    /// Entry points a guest module exports.
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct Exports: u8 {
        const INIT = 0x01;
        const UPDATE = 0x02;
    }
}

/// Host functions imported by the guest. None of them can fail.
pub trait Env {
    fn peek(&self, addr: u16) -> u8;
    fn poke(&mut self, addr: u16, value: u8);
    /// Diagnostic text for the operator's console.
    fn trace(&mut self, text: &[u8]);
}

/// A program running against the console ABI.
pub trait GuestModule {
    fn name(&self) -> &str {
        "guest"
    }

    /// Import names the module expects the host to resolve.
    fn imports(&self) -> &[&str] {
        HOST_IMPORTS
    }

    fn exports(&self) -> Exports {
        Exports::all()
    }

    fn init(&mut self, env: &mut dyn Env) -> Result<(), Trap>;

    fn update(&mut self, env: &mut dyn Env) -> Result<(), Trap>;
}

/// Decodes a `trace` payload: C callers often include the terminator in
/// `len`, so trailing NULs are dropped.
pub fn trace_text(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

pub(crate) struct GuestEnv<'a> {
    memory: &'a mut AddressSpace,
    map: &'a MemoryMap,
}

impl<'a> GuestEnv<'a> {
    pub(crate) fn new(memory: &'a mut AddressSpace, map: &'a MemoryMap) -> Self {
        Self { memory, map }
    }
}

impl Env for GuestEnv<'_> {
    fn peek(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    fn poke(&mut self, addr: u16, value: u8) {
        match self.map.guest_access(addr) {
            Access::ReadWrite => self.memory.write(addr, value),
            Access::ReadOnly => {
                log::trace!("Dropped guest write 0x{:02X} to read-only 0x{:04X}", value, addr);
            }
        }
    }

    fn trace(&mut self, text: &[u8]) {
        log::info!(target: "bytebox::trace", "{}", trace_text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::map::{GAMEPAD1_ADDR, SOUND_STATUS_ADDR, VIDEO_ADDR};

    #[test]
    fn guest_writes_respect_region_policy() {
        let mut memory = AddressSpace::new();
        let map = MemoryMap::default();
        memory.write(GAMEPAD1_ADDR, 0x10);

        let mut env = GuestEnv::new(&mut memory, &map);
        env.poke(GAMEPAD1_ADDR, 0xFF);
        env.poke(SOUND_STATUS_ADDR, 0xFF);
        env.poke(VIDEO_ADDR, 0xFF);
        env.poke(0xFFFF, 0x01);

        assert_eq!(env.peek(GAMEPAD1_ADDR), 0x10);
        assert_eq!(env.peek(SOUND_STATUS_ADDR), 0x00);
        assert_eq!(env.peek(VIDEO_ADDR), 0xFF);
        assert_eq!(env.peek(0xFFFF), 0x01);
    }

    #[test]
    fn trace_text_trims_terminator() {
        assert_eq!(trace_text(b"hello\0"), "hello");
        assert_eq!(trace_text(b"a\0b"), "a\0b");
        assert_eq!(trace_text(b"\0\0"), "");
        assert_eq!(trace_text(&[0x66, 0xFF]), "f\u{FFFD}");
    }

    #[test]
    fn trace_never_fails() {
        let mut memory = AddressSpace::new();
        let map = MemoryMap::default();
        let mut env = GuestEnv::new(&mut memory, &map);
        env.trace(&[]);
        env.trace(&[0xC3, 0x28]);
    }
}
