use bitflags::bitflags;
use bytebox_common::key::Key;

use super::map::{GAMEPAD1_ADDR, GAMEPAD2_ADDR};
use super::AddressSpace;

bitflags! {
    /// Gamepad register layout. A set bit means the button is held.
    ///
    /// Bits 2-3 are unused. Opposite directions may be reported together;
    /// nothing here enforces exclusivity.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Buttons: u8 {
        const BUTTON_2 = 0x01;
        const BUTTON_1 = 0x02;
        const RIGHT = 0x10;
        const DOWN = 0x20;
        const UP = 0x40;
        const LEFT = 0x80;
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub const fn register(self) -> u16 {
        match self {
            Player::One => GAMEPAD1_ADDR,
            Player::Two => GAMEPAD2_ADDR,
        }
    }

    const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Keyboard layout of the reference console.
///
/// - Player one: arrows, Z => Button 1, X => Button 2 (numpad `*`/`-` as
///   alternatives).
/// - Player two: W/A/S/D, K => Button 1, L => Button 2.
pub fn map_key(key: Key) -> Option<(Player, Buttons)> {
    let mapped = match key {
        Key::Left => (Player::One, Buttons::LEFT),
        Key::Right => (Player::One, Buttons::RIGHT),
        Key::Up => (Player::One, Buttons::UP),
        Key::Down => (Player::One, Buttons::DOWN),
        Key::Z | Key::NumpadMultiply => (Player::One, Buttons::BUTTON_1),
        Key::X | Key::NumpadSubtract => (Player::One, Buttons::BUTTON_2),
        Key::A => (Player::Two, Buttons::LEFT),
        Key::D => (Player::Two, Buttons::RIGHT),
        Key::W => (Player::Two, Buttons::UP),
        Key::S => (Player::Two, Buttons::DOWN),
        Key::K => (Player::Two, Buttons::BUTTON_1),
        Key::L => (Player::Two, Buttons::BUTTON_2),
        _ => return None,
    };
    Some(mapped)
}

/// Host-side button state, copied into the gamepad registers once per frame.
///
/// Frontends update the pending state whenever input arrives; the guest
/// only sees it after [`InputLatch::latch`], which the frame cycle calls
/// right before `update`.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputLatch {
    pending: [Buttons; 2],
}

impl InputLatch {
    pub fn set_button(&mut self, player: Player, button: Buttons, pressed: bool) {
        self.pending[player.index()].set(button, pressed);
    }

    pub fn set_buttons(&mut self, player: Player, buttons: Buttons) {
        self.pending[player.index()] = buttons;
    }

    pub fn pending(&self, player: Player) -> Buttons {
        self.pending[player.index()]
    }

    /// Applies a keyboard event. Returns `false` for keys with no binding.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> bool {
        match map_key(key) {
            Some((player, button)) => {
                self.set_button(player, button, pressed);
                true
            }
            None => false,
        }
    }

    pub fn latch(&self, memory: &mut AddressSpace) {
        for player in Player::ALL {
            memory.write(player.register(), self.pending(player).bits());
        }
    }

    /// Current register value for `player`, exactly as the guest would read it.
    pub fn poll(memory: &AddressSpace, player: Player) -> Buttons {
        memory.gamepad(player)
    }
}

impl AddressSpace {
    pub fn gamepad(&self, player: Player) -> Buttons {
        Buttons::from_bits_retain(self.read(player.register()))
    }
}
