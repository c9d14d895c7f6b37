//! converter-range to compare-range scaling

/// Maps a converter reading onto the timer's compare range:
/// `floor(level * period / 2^R)`. Truncating by contract, monotonic,
/// and within `[0, period - 1]` for any in-range level.
#[derive(Clone, Copy, Debug)]
pub struct DutyScale {
    full_scale: u16,
    period: u32,
}

impl DutyScale {
    /// `resolution_bits` is the converter width R; `period_ticks` is the
    /// timer reload value plus one.
    pub const fn new(resolution_bits: u32, period_ticks: u16) -> Self {
        assert!(resolution_bits >= 1 && resolution_bits <= 16);
        assert!(period_ticks > 0);
        Self {
            full_scale: ((1u32 << resolution_bits) - 1) as u16,
            period: period_ticks as u32,
        }
    }

    /// Map one level onto the compare range. A level beyond full scale
    /// breaks the converter contract: asserted in debug builds, clamped
    /// in release builds.
    pub fn duty(&self, level: u16) -> u16 {
        debug_assert!(level <= self.full_scale);
        let level = level.min(self.full_scale);
        (u32::from(level) * self.period / (u32::from(self.full_scale) + 1)) as u16
    }

    pub fn full_scale(&self) -> u16 {
        self.full_scale
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
