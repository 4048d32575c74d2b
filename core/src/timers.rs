/// # Timers
/// The delay (`DT`) and sound (`ST`) countdowns.
///
/// Both count down towards zero and stop there. Programs poll `DT` for
/// timing; a tone should sound whenever `ST` is non-zero.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    /// cycles completed since the last tick when driven by a divider
    elapsed: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrement both timers once, flooring at zero
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Record one completed cycle, ticking once every `divider` cycles.
    /// A divider of 0 is treated as 1.
    pub fn cycle(&mut self, divider: u32) {
        self.elapsed += 1;
        if self.elapsed >= divider.max(1) {
            self.elapsed = 0;
            self.tick();
        }
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_decrements_both() {
        let mut timers = Timers {
            delay: 3,
            sound: 1,
            ..Timers::new()
        };
        timers.tick();
        assert_eq!((timers.delay, timers.sound), (2, 0));
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timers = Timers::new();
        timers.tick();
        assert_eq!((timers.delay, timers.sound), (0, 0));
    }

    #[test]
    fn test_cycle_with_divider_one_ticks_every_cycle() {
        let mut timers = Timers {
            delay: 5,
            ..Timers::new()
        };
        timers.cycle(1);
        timers.cycle(1);
        assert_eq!(timers.delay, 3);
    }

    #[test]
    fn test_cycle_with_divider_ticks_every_nth_cycle() {
        let mut timers = Timers {
            delay: 5,
            ..Timers::new()
        };
        for _ in 0..7 {
            timers.cycle(3);
        }
        // ticks after cycles 3 and 6
        assert_eq!(timers.delay, 3);
    }

    #[test]
    fn test_zero_divider_behaves_as_one() {
        let mut timers = Timers {
            sound: 2,
            ..Timers::new()
        };
        timers.cycle(0);
        assert_eq!(timers.sound, 1);
    }

    #[test]
    fn test_sound_active() {
        let mut timers = Timers {
            sound: 1,
            ..Timers::new()
        };
        assert!(timers.sound_active());
        timers.tick();
        assert!(!timers.sound_active());
    }
}
