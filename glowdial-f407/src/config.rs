//! build-time pipeline configuration

use embassy_stm32::adc::SampleTime;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::{CountingMode, OutputPolarity};
use embassy_time::Duration;

/// Sampling-side operating mode.
#[derive(Clone, Copy, defmt::Format)]
pub enum Mode {
    /// paced one-shot conversions, no smoothing
    Direct,
    /// free-running conversion through the transfer ring, smoothed
    Buffered,
}

pub const MODE: Mode = Mode::Buffered;

pub mod adc {
    use super::SampleTime;

    /// converter width
    pub const RESOLUTION_BITS: u32 = 12;
    /// samples per smoothing window
    pub const RING_CAPACITY: usize = 8;
    /// hardware ring behind the window: two halves, drained one window
    /// per half-transfer
    pub const DMA_RING_LEN: usize = RING_CAPACITY * 2;
    /// long settling window; the wiper is high impedance and the loop
    /// has bandwidth to spare
    pub const WINDOW_SAMPLE_TIME: SampleTime = SampleTime::CYCLES480;
    pub const DIRECT_SAMPLE_TIME: SampleTime = SampleTime::CYCLES84;
    /// consecutive failed re-arms before the pipeline is declared dead
    pub const REARM_LIMIT: u8 = 3;
}

pub mod pwm {
    use super::{CountingMode, Hertz, OutputPolarity};

    pub const FREQ: Hertz = Hertz::khz(1);
    pub const COUNTING: CountingMode = CountingMode::CenterAlignedBothInterrupts;
    /// board LEDs sink current, lit while the pin is low; low-active
    /// output keeps the compare register equal to the lit fraction
    pub const POLARITY: OutputPolarity = OutputPolarity::ActiveLow;
}

pub mod watch {
    /// near-rail bounds; a healthy wiper never reads this close to an end
    pub const LOW: u16 = 16;
    pub const HIGH: u16 = 4080;
}

pub mod direct {
    use super::Duration;

    /// update cadence; far above flicker fusion, far below the converter rate
    pub const CADENCE: Duration = Duration::from_hz(500);
}

pub mod log {
    /// one stats line per this many committed updates
    pub const STATS_STRIDE: u32 = 8192;
}

const _: () = assert!(adc::RING_CAPACITY > 0);
const _: () = assert!(adc::DMA_RING_LEN == 2 * adc::RING_CAPACITY);
const _: () = assert!(watch::LOW <= watch::HIGH);
const _: () = assert!((watch::HIGH as u32) < (1 << adc::RESOLUTION_BITS));
const _: () = assert!(log::STATS_STRIDE > 0);
