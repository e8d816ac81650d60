use std::time::Duration;

/// Target frame rate of the console.
pub const FRAME_RATE_HZ: u32 = 60;

/// Backlog beyond which the host is considered to be falling behind.
const SLOW_FRAME_THRESHOLD: Duration = Duration::from_millis(200);

/// Fixed-step frame scheduler.
///
/// Wall time is fed in as it passes; [`FrameClock::advance`] answers how many
/// whole frames are due. A slow host therefore runs several updates back to
/// back instead of slowing the game down.
#[derive(Clone, Debug)]
pub struct FrameClock {
    step: Duration,
    accumulator: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_RATE_HZ)
    }
}

impl FrameClock {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / rate_hz.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time left until the next frame is due.
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        if self.accumulator > SLOW_FRAME_THRESHOLD {
            log::warn!(
                "Performance degradation detected: {} ms behind",
                self.accumulator.as_millis()
            );
        }

        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hertz_step() {
        let clock = FrameClock::default();
        assert_eq!(clock.step(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut clock = FrameClock::default();
        let half = clock.step() / 2;
        assert_eq!(clock.advance(half), 0);
        assert_eq!(clock.until_next(), clock.step() - half);
        assert_eq!(clock.advance(half), 1);
    }

    #[test]
    fn catches_up_after_a_stall() {
        let mut clock = FrameClock::default();
        let due = clock.advance(clock.step() * 5 + Duration::from_millis(1));
        assert_eq!(due, 5);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}
