use bytebox_common::app::App;
use bytebox_common::key::Key;

use crate::cycle::{ExecutionCycle, Host, Tick};
use crate::error::CycleError;
use crate::{SCREEN_HEIGHT, SCREEN_SCALE, SCREEN_WIDTH};

/// Frontend-facing wrapper around an [`ExecutionCycle`].
///
/// Implements the shared `App` trait so that any frontend can drive the
/// console the same way it drives other machines: keys go to the input
/// latch, `update` runs one frame and renders it.
///
/// Pausing only stops scheduling frames; unlike `HALT` it can be undone.
pub struct ConsoleApp<H: Host> {
    pub cycle: ExecutionCycle,
    pub host: H,
    should_exit: bool,
    paused: bool,
}

impl<H: Host> ConsoleApp<H> {
    pub fn new(cycle: ExecutionCycle, host: H) -> Self {
        Self {
            cycle,
            host,
            should_exit: false,
            paused: false,
        }
    }

    pub fn start(&mut self) -> Result<(), CycleError> {
        log::info!("ByteBox init");
        self.cycle.start()
    }

    /// Runs one frame unless paused, then renders the framebuffer.
    /// A paused console reports [`Tick::Continue`] and redraws the last
    /// frame.
    pub fn step(&mut self, screen: &mut [u8]) -> Result<Tick, CycleError> {
        let tick = if self.paused {
            Ok(Tick::Continue)
        } else {
            self.cycle.tick(&mut self.host)
        };
        self.cycle.render_rgb24(screen);
        tick
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::warn!("Game paused at frame {}", self.cycle.frames());
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::warn!("Game resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl<H: Host> App for ConsoleApp<H> {
    fn init(&mut self) {
        if let Err(err) = self.start() {
            log::error!("ByteBox failed to start: {}", err);
            self.should_exit = true;
        }
    }

    fn update(&mut self, screen: &mut [u8]) {
        // On Halted the last frame stays on screen.
        if let Err(err) = self.step(screen) {
            log::error!("ByteBox stopped: {}", err);
            self.should_exit = true;
        }
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if key == Key::Escape {
            self.should_exit = true;
            return;
        }
        if !self.cycle.input_mut().handle_key(key, is_down) {
            log::trace!("Unmapped key {:?}", key);
        }
    }

    fn handle_focus(&mut self, focused: bool) {
        if focused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("ByteBox exit after {} frames", self.cycle.frames());
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        let name = self.cycle.memory().game_name();
        if name.is_empty() {
            "ByteBox".to_string()
        } else {
            format!("ByteBox - {}", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::NullHost;
    use crate::error::Trap;
    use crate::guest::{Env, GuestModule};
    use crate::memory::map::{GAMEPAD2_ADDR, VIDEO_ADDR};
    use crate::memory::video::DEFAULT_PALETTE;
    use crate::ConsoleConfig;

    /// Lights the first four pixels while player two holds any button.
    struct Lamp;

    impl GuestModule for Lamp {
        fn init(&mut self, _env: &mut dyn Env) -> Result<(), Trap> {
            Ok(())
        }

        fn update(&mut self, env: &mut dyn Env) -> Result<(), Trap> {
            let value = if env.peek(GAMEPAD2_ADDR) != 0 { 0xFF } else { 0x00 };
            env.poke(VIDEO_ADDR, value);
            Ok(())
        }
    }

    fn app() -> ConsoleApp<NullHost> {
        let mut cycle = ExecutionCycle::new(ConsoleConfig::builder().seed(0).build());
        cycle.load(Box::new(Lamp), &mut NullHost).unwrap();
        ConsoleApp::new(cycle, NullHost)
    }

    #[test]
    fn keys_reach_the_guest_on_the_next_frame() {
        let mut app = app();
        let mut screen = vec![0u8; (app.width() * app.height() * 3) as usize];
        app.init();

        app.update(&mut screen);
        assert_eq!(&screen[0..3], &DEFAULT_PALETTE[0].to_bytes());

        app.handle_key_event(Key::K, true);
        app.update(&mut screen);
        assert_eq!(&screen[0..3], &DEFAULT_PALETTE[3].to_bytes());
        assert_eq!(&screen[9..12], &DEFAULT_PALETTE[3].to_bytes());
        assert_eq!(&screen[12..15], &DEFAULT_PALETTE[0].to_bytes());

        app.handle_key_event(Key::K, false);
        app.update(&mut screen);
        assert_eq!(&screen[0..3], &DEFAULT_PALETTE[0].to_bytes());
        assert!(!app.should_exit());
    }

    #[test]
    fn pause_freezes_frames_until_resumed() {
        let mut app = app();
        let mut screen = vec![0u8; (app.width() * app.height() * 3) as usize];
        app.init();
        app.update(&mut screen);
        assert_eq!(app.cycle.frames(), 1);

        app.handle_focus(false);
        assert!(app.is_paused());
        app.handle_key_event(Key::K, true);
        assert_eq!(app.step(&mut screen).unwrap(), Tick::Continue);
        app.update(&mut screen);
        assert_eq!(app.cycle.frames(), 1);
        // Input is still collected, but the guest has not seen it.
        assert_eq!(&screen[0..3], &DEFAULT_PALETTE[0].to_bytes());
        assert_eq!(app.cycle.state(), crate::CycleState::Running);

        app.handle_focus(true);
        assert!(!app.is_paused());
        app.update(&mut screen);
        assert_eq!(app.cycle.frames(), 2);
        assert_eq!(&screen[0..3], &DEFAULT_PALETTE[3].to_bytes());
    }

    #[test]
    fn pausing_does_not_revive_a_halted_guest() {
        let mut app = app();
        let mut screen = vec![0u8; 3];
        app.init();
        app.cycle.request_halt();
        app.pause();
        app.resume();
        assert_eq!(app.step(&mut screen).unwrap(), Tick::Halted);
        assert_eq!(app.cycle.frames(), 0);
    }

    #[test]
    fn escape_requests_exit() {
        let mut app = app();
        app.init();
        app.handle_key_event(Key::Escape, true);
        assert!(app.should_exit());
    }

    #[test]
    fn ticking_without_a_guest_exits() {
        let mut app = ConsoleApp::new(ExecutionCycle::default(), NullHost);
        app.init();
        assert!(app.should_exit());
        let mut screen = vec![0u8; 3];
        app.update(&mut screen);
        assert!(app.should_exit());
        assert_eq!(app.title(), "ByteBox");
    }
}
