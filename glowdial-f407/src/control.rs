//! notifier tasks: one window (or sample) in, one duty commit out

use embassy_stm32::adc::{Adc, AnyAdcChannel, RingBufferedAdc};
use embassy_stm32::peripherals::{ADC1, TIM1};
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Ticker;
use glowdial_core::{Arena, DutyScale, Excursion, LevelWatch, Pipeline, Stats, Update};

use crate::config;

/// Raised once when a pipeline gives up; the foreground owns reporting.
pub static FAULT: Signal<CriticalSectionRawMutex, Fault> = Signal::new();

#[derive(Clone, Copy, defmt::Format)]
pub enum Fault {
    /// ring reads kept overrunning through repeated re-arms
    TransferStalled { overruns: u32 },
}

#[embassy_executor::task]
pub async fn buffered(
    mut adc: RingBufferedAdc<'static, ADC1>,
    led: SimplePwmChannel<'static, TIM1>,
) {
    let period = led.max_duty_cycle();
    defmt::info!(
        "buffered pipeline: {=usize}-sample window, {=u16}-tick period",
        config::adc::RING_CAPACITY,
        period
    );
    let scale = DutyScale::new(config::adc::RESOLUTION_BITS, period);
    let mut pipeline = Pipeline::new(led, scale).unwrap();
    let mut watch = LevelWatch::new(config::watch::LOW, config::watch::HIGH);
    let mut arena = Arena::<{ config::adc::RING_CAPACITY }>::new();
    let mut stalls: u8 = 0;

    let _ = adc.start();
    loop {
        match adc.read(arena.write_ring()).await {
            Ok(_) => {
                stalls = 0;
                let update = pipeline.on_window(arena.swap()).unwrap();
                report(&mut watch, update, pipeline.stats());
            }
            Err(_) => {
                pipeline.record_overrun();
                let overruns = pipeline.stats().overruns;
                defmt::warn!("adc ring overrun ({=u32} total)", overruns);
                stalls += 1;
                if stalls >= config::adc::REARM_LIMIT {
                    // park the output before giving up on the engine
                    let _ = pipeline.disarm();
                    FAULT.signal(Fault::TransferStalled { overruns });
                    return;
                }
                // single-channel sequence: nothing to realign, re-arm
                let _ = adc.start();
            }
        }
    }
}

#[embassy_executor::task]
pub async fn direct(
    mut adc: Adc<'static, ADC1>,
    mut pot: AnyAdcChannel<ADC1>,
    led: SimplePwmChannel<'static, TIM1>,
) {
    let period = led.max_duty_cycle();
    defmt::info!("direct pipeline: unsmoothed, {=u16}-tick period", period);
    let scale = DutyScale::new(config::adc::RESOLUTION_BITS, period);
    let mut pipeline = Pipeline::new(led, scale).unwrap();
    let mut watch = LevelWatch::new(config::watch::LOW, config::watch::HIGH);
    let mut ticker = Ticker::every(config::direct::CADENCE);

    // one conversion per tick, consumed synchronously, so the data
    // register cannot overrun
    loop {
        ticker.next().await;
        let sample = adc.blocking_read(&mut pot);
        let update = pipeline.on_sample(sample).unwrap();
        report(&mut watch, update, pipeline.stats());
    }
}

fn report(watch: &mut LevelWatch, update: Update, stats: Stats) {
    match watch.observe(update.level) {
        Some(Excursion::Began) => {
            defmt::warn!("level {=u16} left the watch window", update.level)
        }
        Some(Excursion::Ended) => defmt::info!("level back inside the watch window"),
        None => {}
    }
    if stats.updates % config::log::STATS_STRIDE == 0 {
        defmt::debug!(
            "updates={=u32} overruns={=u32} level={=u16} duty={=u16}",
            stats.updates,
            stats.overruns,
            update.level,
            update.duty
        );
    }
}
