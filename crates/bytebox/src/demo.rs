//! The starter game shipped with the SDK: a 4x4 block that slides along the
//! bottom of the screen.
//!
//! It only touches the console through `peek`/`poke`, so it exercises the
//! same ABI a compiled cartridge would.

use bytebox_core::memory::map::{
    COLOR4_ADDR, GAMENAME_ADDR, GAMEPAD1_ADDR, SFX_CH1_ADDR, VIDEO_ADDR,
};
use bytebox_core::{Buttons, Env, GuestModule, Trap, FRAMEBUFFER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

const GAME_NAME: &[u8] = b"BYTEBOX TEMPLATE";

#[derive(Debug, Default)]
pub struct TemplateGame {
    pub player_x: u8,
    pub player_y: u8,
}

impl TemplateGame {
    fn clear_screen(env: &mut dyn Env) {
        for i in 0..FRAMEBUFFER_SIZE {
            env.poke(VIDEO_ADDR + i as u16, 0x00);
        }
    }

    fn update_player(&mut self, env: &mut dyn Env) {
        let pad = Buttons::from_bits_retain(env.peek(GAMEPAD1_ADDR));

        let mut new_x = self.player_x;
        if pad.contains(Buttons::LEFT) {
            new_x = new_x.wrapping_sub(2);
        }
        if pad.contains(Buttons::RIGHT) {
            new_x = new_x.wrapping_add(2);
        }
        // Moves that would leave the screen are rejected outright; stepping
        // left past zero wraps high and is caught here too.
        if (new_x as usize) < SCREEN_WIDTH {
            self.player_x = new_x;
        }

        if pad.contains(Buttons::BUTTON_1) {
            env.poke(SFX_CH1_ADDR, 0x7D);
            env.poke(SFX_CH1_ADDR + 1, 0xC3);
            env.poke(SFX_CH1_ADDR + 2, 0x3C);
            env.poke(SFX_CH1_ADDR + 3, 0x87);
        }

        if pad.contains(Buttons::BUTTON_2) {
            let address = COLOR4_ADDR + 2;
            let blue = env.peek(address).wrapping_add(0x0A);
            env.poke(address, blue);
        }
    }

    fn draw_player(&self, env: &mut dyn Env) {
        for dy in 0..4u16 {
            let row = (self.player_y as u16 + dy) * SCREEN_WIDTH as u16;
            env.poke(VIDEO_ADDR + (row + self.player_x as u16) / 4, 0xFF);
        }
    }
}

impl GuestModule for TemplateGame {
    fn name(&self) -> &str {
        "template"
    }

    fn init(&mut self, env: &mut dyn Env) -> Result<(), Trap> {
        self.player_x = (SCREEN_WIDTH / 2) as u8;
        self.player_y = (SCREEN_HEIGHT - 20) as u8;
        for (i, byte) in GAME_NAME.iter().enumerate() {
            env.poke(GAMENAME_ADDR + i as u16, *byte);
        }
        env.trace(b"template game ready\0");
        Ok(())
    }

    fn update(&mut self, env: &mut dyn Env) -> Result<(), Trap> {
        Self::clear_screen(env);
        self.update_player(env);
        self.draw_player(env);
        Ok(())
    }
}
