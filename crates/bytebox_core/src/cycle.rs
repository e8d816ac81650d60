use crate::config::ConsoleConfig;
use crate::error::{CycleError, LoadError};
use crate::guest::{Exports, GuestEnv, GuestModule, HOST_IMPORTS};
use crate::memory::input::{Buttons, InputLatch, Player};
use crate::memory::map::{MemoryMap, SEED_ADDR, WRAM_ADDR, WRAM_SIZE};
use crate::memory::AddressSpace;

/// Lifecycle of a loaded guest.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CycleState {
    /// No guest loaded yet.
    Uninitialized,
    /// Imports and exports resolved; `init` not called yet.
    Ready,
    Running,
    /// Terminal. `update` is never called again.
    Halted,
}

/// Result of one [`ExecutionCycle::tick`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tick {
    Continue,
    Halted,
}

/// Host collaborators serviced once per frame.
///
/// Every method has a no-op default so that headless hosts and tests only
/// implement what they observe.
pub trait Host {
    /// The video region is final for this frame.
    fn present(&mut self, _memory: &AddressSpace) {}

    /// Gives the audio backend a chance to read (and acknowledge) the SFX
    /// channel registers.
    fn poll_audio(&mut self, _memory: &mut AddressSpace) {}

    /// WRAM contents saved by a previous session, if any.
    fn restore_wram(&mut self) -> Option<Vec<u8>> {
        None
    }

    fn store_wram(&mut self, _wram: &[u8]) {}
}

#[derive(Default)]
pub struct NullHost;

impl Host for NullHost {}

/// Drives a guest module through `init` and per-frame `update` calls.
///
/// One tick is one frame:
/// 1. latch the pending gamepad state into the gamepad registers
/// 2. call `update`
/// 3. service audio and WRAM dump requests
/// 4. present the framebuffer
/// 5. stop for good if the guest (or host) raised `HALT`
pub struct ExecutionCycle {
    config: ConsoleConfig,
    memory: AddressSpace,
    map: MemoryMap,
    input: InputLatch,
    guest: Option<Box<dyn GuestModule>>,
    state: CycleState,
    frames: u64,
}

impl Default for ExecutionCycle {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl ExecutionCycle {
    pub fn new(config: ConsoleConfig) -> Self {
        let mut memory = AddressSpace::new();
        memory.set_palette(&config.palette);
        Self {
            config,
            memory,
            map: MemoryMap::default(),
            input: InputLatch::default(),
            guest: None,
            state: CycleState::Uninitialized,
            frames: 0,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Number of completed `update` calls.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// Unrestricted host access to memory.
    pub fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.memory
    }

    pub fn map(&self) -> &MemoryMap {
        &self.map
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    pub fn set_buttons(&mut self, player: Player, buttons: Buttons) {
        self.input.set_buttons(player, buttons);
    }

    /// Host-initiated halt; honoured at the next frame boundary.
    pub fn request_halt(&mut self) {
        self.memory.request_halt();
    }

    /// Resolves the guest against the host ABI and prepares memory for it.
    pub fn load(
        &mut self,
        guest: Box<dyn GuestModule>,
        host: &mut dyn Host,
    ) -> Result<(), LoadError> {
        if self.state != CycleState::Uninitialized {
            return Err(LoadError::AlreadyLoaded);
        }

        if let Some(missing) = guest
            .imports()
            .iter()
            .find(|name| !HOST_IMPORTS.contains(*name))
        {
            return Err(LoadError::UnresolvedImport(missing.to_string()));
        }

        let exports = guest.exports();
        if !exports.contains(Exports::INIT) {
            return Err(LoadError::MissingExport("init"));
        }
        if !exports.contains(Exports::UPDATE) {
            return Err(LoadError::MissingExport("update"));
        }

        self.map = MemoryMap::new(self.config.regions.clone())?;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        self.memory.write(SEED_ADDR, seed);

        if let Some(wram) = host.restore_wram() {
            let len = wram.len().min(WRAM_SIZE);
            self.memory.load(WRAM_ADDR, &wram[..len]);
            log::debug!("Restored {} bytes of WRAM", len);
        }

        log::info!("Loaded guest '{}' (seed 0x{:02X})", guest.name(), seed);
        self.guest = Some(guest);
        self.state = CycleState::Ready;
        Ok(())
    }

    /// Calls the guest's `init` export exactly once.
    pub fn start(&mut self) -> Result<(), CycleError> {
        if self.state != CycleState::Ready {
            return Err(CycleError::InvalidState {
                action: "start",
                state: self.state,
            });
        }

        let Some(guest) = self.guest.as_mut() else {
            return Err(CycleError::InvalidState {
                action: "start",
                state: self.state,
            });
        };

        if let Err(trap) = guest.init(&mut GuestEnv::new(&mut self.memory, &self.map)) {
            log::error!("Guest trapped in init: {}", trap);
            self.state = CycleState::Halted;
            return Err(CycleError::Trap {
                export: "init",
                trap,
            });
        }

        self.state = CycleState::Running;
        log::info!("Game '{}' is running", self.memory.game_name());
        Ok(())
    }

    /// Runs one frame. Once halted, this keeps returning [`Tick::Halted`]
    /// without calling back into the guest.
    pub fn tick(&mut self, host: &mut dyn Host) -> Result<Tick, CycleError> {
        match self.state {
            CycleState::Running => {}
            CycleState::Halted => return Ok(Tick::Halted),
            state => {
                return Err(CycleError::InvalidState {
                    action: "tick",
                    state,
                })
            }
        }

        // Raised outside `update` (during `init`, or by the host).
        if self.memory.is_halted() {
            self.halt();
            return Ok(Tick::Halted);
        }

        self.input.latch(&mut self.memory);

        let result = match self.guest.as_mut() {
            Some(guest) => guest.update(&mut GuestEnv::new(&mut self.memory, &self.map)),
            None => Ok(()),
        };
        if let Err(trap) = result {
            log::error!("Guest trapped in update at frame {}: {}", self.frames, trap);
            self.state = CycleState::Halted;
            return Err(CycleError::Trap {
                export: "update",
                trap,
            });
        }
        self.frames += 1;

        host.poll_audio(&mut self.memory);
        if self.memory.take_wram_dump() {
            log::debug!("Guest requested a WRAM dump at frame {}", self.frames);
            host.store_wram(self.memory.slice(WRAM_ADDR, WRAM_SIZE));
        }
        host.present(&self.memory);

        if self.memory.is_halted() {
            self.halt();
            return Ok(Tick::Halted);
        }
        Ok(Tick::Continue)
    }

    pub fn render_rgb24(&self, buffer: &mut [u8]) {
        self.memory.render_rgb24(buffer);
    }

    fn halt(&mut self) {
        log::info!("Guest halted after {} frames", self.frames);
        self.state = CycleState::Halted;
    }
}
