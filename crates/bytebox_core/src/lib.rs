//! Host runtime for the ByteBox fantasy console.
//!
//! A guest program only ever sees the console through a fixed 64 KiB
//! memory-mapped contract: it reads and writes bytes with `peek`/`poke`,
//! emits diagnostics with `trace`, and is called back through `init` once
//! and `update` once per frame. This crate owns that memory and the frame
//! cycle around it.

pub mod app;
pub mod clock;
pub mod config;
pub mod cycle;
pub mod debugger;
pub mod error;
pub mod guest;
pub mod memory;

pub use app::ConsoleApp;
pub use clock::FrameClock;
pub use config::ConsoleConfig;
pub use cycle::{CycleState, ExecutionCycle, Host, NullHost, Tick};
pub use debugger::{MemoryRow, MemoryViewer};
pub use error::{CycleError, LoadError, MapError, Trap};
pub use guest::{Env, Exports, GuestModule, HOST_IMPORTS};
pub use memory::flags::SysFlags;
pub use memory::input::{Buttons, InputLatch, Player};
pub use memory::map::{Access, MemoryMap, Region, RegionKind};
pub use memory::AddressSpace;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Default integer scaling factor for windowed frontends.
pub const SCREEN_SCALE: u32 = 4;
/// Total addressable memory (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;
/// Size of the packed framebuffer: four 2-bit pixels per byte.
pub const FRAMEBUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 4;
