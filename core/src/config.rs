/// How the delay and sound timers are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Timers decrement once every `divider` completed cycles.
    /// A divider of 1 ties them directly to instruction throughput.
    PerCycle { divider: u32 },
    /// Timers only decrement when the host calls `Chip8::tick_timers`,
    /// letting it hold them to a wall-clock rate (typically 60Hz).
    External,
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::PerCycle { divider: 1 }
    }
}

/// # Config
/// Behaviour switches for a `Chip8`.
///
/// - `timer_mode` see `TimerMode`
/// - `strict_opcodes` fail the cycle on an unknown opcode instead of skipping it
/// - `rng_seed` seed the generator behind `RND` for reproducible runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub timer_mode: TimerMode,
    pub strict_opcodes: bool,
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn timer_mode(mut self, timer_mode: TimerMode) -> Self {
        self.timer_mode = timer_mode;
        self
    }

    pub fn strict_opcodes(mut self, strict: bool) -> Self {
        self.strict_opcodes = strict;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ticks_timers_every_cycle() {
        let config = Config::default();
        assert_eq!(config.timer_mode, TimerMode::PerCycle { divider: 1 });
        assert!(!config.strict_opcodes);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = Config::default()
            .timer_mode(TimerMode::External)
            .strict_opcodes(true)
            .rng_seed(7);
        assert_eq!(config.timer_mode, TimerMode::External);
        assert!(config.strict_opcodes);
        assert_eq!(config.rng_seed, Some(7));
    }
}
