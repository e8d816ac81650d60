use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use bytebox_common::app::App;
use bytebox_common::key::Key;
use bytebox_core::{
    AddressSpace, ConsoleApp, ConsoleConfig, ExecutionCycle, FrameClock, GuestModule, Host,
    MemoryRow, MemoryViewer, Tick,
};

/// How a headless session is driven.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub frames: u32,
    /// Keys held down for the whole session.
    pub held_keys: Vec<Key>,
    /// Pace frames at 60 Hz instead of running flat out.
    pub realtime: bool,
    /// Where WRAM is saved when the game asks for it.
    pub wram_path: Option<PathBuf>,
    /// Base address of a memory view refreshed every frame.
    pub memory_view: Option<u16>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 120,
            held_keys: Vec::new(),
            realtime: false,
            wram_path: None,
            memory_view: None,
        }
    }
}

/// Headless host: persists WRAM to a file and counts presented frames.
#[derive(Default)]
pub struct RunnerHost {
    wram_path: Option<PathBuf>,
    presented: u64,
}

impl RunnerHost {
    pub fn new(wram_path: Option<PathBuf>) -> Self {
        Self {
            wram_path,
            presented: 0,
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Host for RunnerHost {
    fn present(&mut self, _memory: &AddressSpace) {
        self.presented += 1;
        if self.presented % 60 == 0 {
            log::debug!("Presented {} frames", self.presented);
        }
    }

    fn restore_wram(&mut self) -> Option<Vec<u8>> {
        let path = self.wram_path.as_ref()?;
        match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                log::warn!("Failed to read WRAM from {}: {err}", path.display());
                None
            }
        }
    }

    fn store_wram(&mut self, wram: &[u8]) {
        let Some(path) = self.wram_path.as_ref() else {
            log::debug!("WRAM dump requested but no save path is configured");
            return;
        };
        if let Err(err) = std::fs::write(path, wram) {
            log::warn!("Failed to store WRAM to {}: {err}", path.display());
        }
    }
}

/// What a finished session leaves behind.
#[derive(Debug)]
pub struct RunOutput {
    /// Last frame as RGB24.
    pub screen: Vec<u8>,
    /// `update` calls that ran; fewer than requested if the guest halted.
    pub frames: u64,
    /// Final memory view, changes marked against the frame before.
    pub memory_view: Vec<MemoryRow>,
}

/// Runs `guest` for up to `options.frames` frames.
pub fn run(
    config: ConsoleConfig,
    guest: Box<dyn GuestModule>,
    options: &RunOptions,
) -> Result<RunOutput> {
    let mut host = RunnerHost::new(options.wram_path.clone());
    let mut cycle = ExecutionCycle::new(config);
    cycle
        .load(guest, &mut host)
        .context("Failed to load guest module")?;

    let mut app = ConsoleApp::new(cycle, host);
    let mut screen = vec![0u8; (app.width() * app.height() * 3) as usize];

    app.start().context("Guest failed to initialise")?;
    log::info!(
        "Running '{}' for {} frames ({}x{}, scale {})",
        app.title(),
        options.frames,
        app.width(),
        app.height(),
        app.scale()
    );

    let mut viewer = options.memory_view.map(MemoryViewer::new);
    let mut memory_view = Vec::new();

    for &key in &options.held_keys {
        app.handle_key_event(key, true);
    }

    let mut clock = FrameClock::default();
    let mut last = Instant::now();
    let mut frame = 0;
    'session: while frame < options.frames && !app.should_exit() {
        let due = if options.realtime {
            std::thread::sleep(clock.until_next());
            let now = Instant::now();
            let due = clock.advance(now.duration_since(last));
            last = now;
            due
        } else {
            1
        };

        for _ in 0..due.min(options.frames - frame) {
            let tick = app
                .step(&mut screen)
                .with_context(|| format!("Guest stopped at frame {}", frame))?;
            if let Some(viewer) = viewer.as_mut() {
                memory_view = viewer.view(app.cycle.memory());
            }
            frame += 1;
            if tick == Tick::Halted {
                log::info!("Guest halted, ending the session early");
                break 'session;
            }
        }
    }

    app.exit();
    Ok(RunOutput {
        screen,
        frames: app.cycle.frames(),
        memory_view,
    })
}
