//! Sound effect channel registers.
//!
//! The core only stores these bytes. What the four bytes of a channel mean
//! (pitch, envelope, waveform...) is up to the audio backend, which reads
//! them once per frame through [`crate::Host::poll_audio`].

use super::map::{SFX_ADDR, SOUND_STATUS_ADDR};
use super::AddressSpace;

pub const NUM_CHANNELS: usize = 4;
pub const CHANNEL_SIZE: usize = 4;

/// Address of byte `offset` of `channel`. Both indices are masked, so any
/// input lands inside the SFX block.
#[inline]
pub fn channel_addr(channel: usize, offset: usize) -> u16 {
    let channel = channel % NUM_CHANNELS;
    let offset = offset % CHANNEL_SIZE;
    SFX_ADDR + (channel * CHANNEL_SIZE + offset) as u16
}

impl AddressSpace {
    pub fn write_channel(&mut self, channel: usize, offset: usize, value: u8) {
        self.write(channel_addr(channel, offset), value);
    }

    pub fn read_channel(&self, channel: usize, offset: usize) -> u8 {
        self.read(channel_addr(channel, offset))
    }

    pub fn channel(&self, channel: usize) -> [u8; CHANNEL_SIZE] {
        std::array::from_fn(|offset| self.read_channel(channel, offset))
    }

    pub fn sound_status(&self) -> u8 {
        self.read(SOUND_STATUS_ADDR)
    }

    /// Backend-side report of whether `channel` is currently sounding.
    pub fn set_channel_playing(&mut self, channel: usize, playing: bool) {
        let mask = 1u8 << (channel % NUM_CHANNELS);
        let status = self.sound_status();
        let status = if playing { status | mask } else { status & !mask };
        self.write(SOUND_STATUS_ADDR, status);
    }
}
