//! completion-side state: filter, map, commit

use embedded_hal::pwm::SetDutyCycle;

use crate::duty::DutyScale;
use crate::filter;

/// One committed update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Update {
    /// representative converter level (smoothed, or the fresh sample)
    pub level: u16,
    /// compare value written to the sink
    pub duty: u16,
}

/// Running counters, readable from the owning context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub updates: u32,
    pub overruns: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Idle,
    Updating,
}

/// Completion-side owner of the actuation sink. Every completed window
/// (or fresh sample, in direct mode) passes through here exactly once,
/// in event order; the sink's compare register has no other writer.
pub struct Pipeline<S: SetDutyCycle> {
    sink: S,
    scale: DutyScale,
    step: Step,
    stats: Stats,
}

impl<S: SetDutyCycle> Pipeline<S> {
    /// Takes ownership of the sink and parks it at zero duty until the
    /// first window lands.
    pub fn new(mut sink: S, scale: DutyScale) -> Result<Self, S::Error> {
        sink.set_duty_cycle(0)?;
        Ok(Self {
            sink,
            scale,
            step: Step::Idle,
            stats: Stats::default(),
        })
    }

    /// Smooth one completed window and commit the mapped duty.
    pub fn on_window<const N: usize>(&mut self, window: &[u16; N]) -> Result<Update, S::Error> {
        self.begin();
        self.commit(filter::average(window))
    }

    /// Commit one fresh sample unsmoothed (direct mode).
    pub fn on_sample(&mut self, sample: u16) -> Result<Update, S::Error> {
        self.begin();
        self.commit(sample)
    }

    fn begin(&mut self) {
        // only one notifier context exists; a second completion cannot
        // arrive while one is in flight
        debug_assert_eq!(self.step, Step::Idle);
        self.step = Step::Updating;
    }

    fn commit(&mut self, level: u16) -> Result<Update, S::Error> {
        let duty = self.scale.duty(level);
        let written = self.sink.set_duty_cycle(duty);
        self.step = Step::Idle;
        written?;
        self.stats.updates = self.stats.updates.wrapping_add(1);
        Ok(Update { level, duty })
    }

    /// A produced value was lost before it could be read.
    pub fn record_overrun(&mut self) {
        self.stats.overruns = self.stats.overruns.wrapping_add(1);
    }

    /// Force the sink back to zero duty. Fault path: called before the
    /// owning context gives up on the transfer engine.
    pub fn disarm(&mut self) -> Result<(), S::Error> {
        self.sink.set_duty_cycle(0)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// Records committed compare values in order.
    struct TracePwm {
        period: u16,
        written: [u16; 8],
        writes: usize,
    }

    impl TracePwm {
        fn new(period: u16) -> Self {
            Self {
                period,
                written: [0; 8],
                writes: 0,
            }
        }

        fn last(&self) -> u16 {
            assert!(self.writes > 0);
            self.written[(self.writes - 1) % 8]
        }
    }

    impl ErrorType for TracePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for TracePwm {
        fn max_duty_cycle(&self) -> u16 {
            self.period
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.written[self.writes % 8] = duty;
            self.writes += 1;
            Ok(())
        }
    }

    fn pipeline() -> Pipeline<TracePwm> {
        match Pipeline::new(TracePwm::new(1000), DutyScale::new(12, 1000)) {
            Ok(p) => p,
            Err(e) => match e {},
        }
    }

    #[test]
    fn test_new_parks_sink_low() {
        let p = pipeline();
        assert_eq!(p.sink.last(), 0);
        assert_eq!(p.stats().updates, 0);
    }

    #[test]
    fn test_window_scenarios() {
        let mut p = pipeline();

        let quiet = p.on_window(&[0u16; 8]).unwrap();
        assert_eq!(quiet, Update { level: 0, duty: 0 });

        let saturated = p.on_window(&[4095u16; 8]).unwrap();
        assert_eq!(saturated, Update { level: 4095, duty: 999 });

        let mixed = p
            .on_window(&[0, 1000, 2000, 3000, 4000, 4095, 500, 1500])
            .unwrap();
        assert_eq!(mixed, Update { level: 2011, duty: 490 });

        assert_eq!(p.stats().updates, 3);
    }

    #[test]
    fn test_direct_sample_skips_smoothing() {
        let mut p = pipeline();
        let update = p.on_sample(2048).unwrap();
        assert_eq!(update, Update { level: 2048, duty: 500 });
        assert_eq!(p.sink.last(), 500);
    }

    #[test]
    fn test_unchanged_window_recommits_same_duty() {
        let mut p = pipeline();
        let window = [0, 1000, 2000, 3000, 4000, 4095, 500, 1500];
        let first = p.on_window(&window).unwrap();
        let second = p.on_window(&window).unwrap();
        assert_eq!(first, second);
        assert_eq!(p.stats().updates, 2);
    }

    #[test]
    fn test_one_commit_per_window_in_order() {
        let mut p = pipeline();
        let windows = [[512u16; 8], [1024; 8], [2048; 8], [4095; 8]];
        for window in &windows {
            p.on_window(window).unwrap();
        }
        assert_eq!(p.stats().updates, windows.len() as u32);
        // initial park plus one write per window, in event order
        assert_eq!(p.sink.writes, 1 + windows.len());
        assert_eq!(&p.sink.written[..5], &[0, 125, 250, 500, 999]);
    }

    #[test]
    fn test_overruns_count_without_committing() {
        let mut p = pipeline();
        p.record_overrun();
        p.record_overrun();
        assert_eq!(p.stats().overruns, 2);
        assert_eq!(p.stats().updates, 0);
    }

    #[test]
    fn test_disarm_forces_zero_duty() {
        let mut p = pipeline();
        p.on_window(&[4095u16; 8]).unwrap();
        assert_eq!(p.sink.last(), 999);
        p.disarm().unwrap();
        assert_eq!(p.sink.last(), 0);
    }
}
